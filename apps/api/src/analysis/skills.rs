//! Skills gap analysis between a resume and a job description.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::resume::Resume;

const KNOWN_JOB_SKILLS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "c++",
    "sql",
    "react",
    "node.js",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "linux",
    "machine learning",
    "data science",
    "agile",
    "scrum",
    "project management",
    "mongodb",
    "postgresql",
    "redis",
    "kafka",
    "rest api",
    "graphql",
    "typescript",
    "angular",
    "vue.js",
    "html",
    "css",
    "tensorflow",
    "pytorch",
    "rust",
    "go",
];

static REQUIREMENT_SECTION_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)skills?[:\s]+(.*?)(?:\n\n|\n[A-Z]|$)",
        r"(?is)requirements?[:\s]+(.*?)(?:\n\n|\n[A-Z]|$)",
        r"(?is)qualifications?[:\s]+(.*?)(?:\n\n|\n[A-Z]|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("requirement section regex"))
    .collect()
});

#[derive(Debug, Serialize)]
pub struct SkillsGap {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    /// Share of job skills covered by the resume, rounded to 2 decimals.
    pub match_percentage: f64,
    pub suggestions: Vec<String>,
}

/// Set-based gap analysis; all lists are sorted for stable responses.
pub fn analyze_gaps(resume: &Resume, job_description: &str) -> SkillsGap {
    let resume_skills: BTreeSet<String> = resume
        .fields
        .skills
        .iter()
        .map(|s| s.name.to_lowercase())
        .collect();
    let job_skills = extract_job_skills(job_description);

    let matching: Vec<String> = resume_skills.intersection(&job_skills).cloned().collect();
    let missing: Vec<String> = job_skills.difference(&resume_skills).cloned().collect();
    let extra: Vec<String> = resume_skills.difference(&job_skills).cloned().collect();

    let match_percentage = if job_skills.is_empty() {
        0.0
    } else {
        let pct = matching.len() as f64 / job_skills.len() as f64 * 100.0;
        (pct * 100.0).round() / 100.0
    };

    let suggestions = gap_suggestions(&matching, &missing, match_percentage);

    SkillsGap {
        matching_skills: matching,
        missing_skills: missing,
        extra_skills: extra,
        match_percentage,
        suggestions,
    }
}

/// Skills named in the job description: known terms anywhere in the text
/// plus word pairs from skills/requirements/qualifications sections.
pub fn extract_job_skills(job_description: &str) -> BTreeSet<String> {
    let mut skills = BTreeSet::new();
    let lower = job_description.to_lowercase();

    for skill in KNOWN_JOB_SKILLS {
        if lower.contains(skill) {
            skills.insert((*skill).to_string());
        }
    }

    for re in REQUIREMENT_SECTION_RES.iter() {
        for caps in re.captures_iter(job_description) {
            for token in caps[1].split(|c: char| !c.is_alphanumeric() && c != '+' && c != '.') {
                if token.len() > 3 {
                    skills.insert(token.to_lowercase());
                }
            }
        }
    }

    skills
}

fn gap_suggestions(matching: &[String], missing: &[String], match_percentage: f64) -> Vec<String> {
    let mut suggestions = Vec::new();

    if match_percentage < 50.0 {
        suggestions.push(
            "Low skill match - consider adding more relevant skills from the job description"
                .to_string(),
        );
    } else if match_percentage < 75.0 {
        suggestions.push(
            "Moderate skill match - add a few more matching skills to improve your fit"
                .to_string(),
        );
    } else {
        suggestions.push(
            "Good skill match - your skills align well with the job requirements".to_string(),
        );
    }

    if !missing.is_empty() {
        let top: Vec<&str> = missing.iter().take(5).map(String::as_str).collect();
        suggestions.push(format!(
            "Consider highlighting or adding these skills: {}",
            top.join(", ")
        ));
    }

    if !matching.is_empty() {
        suggestions.push(format!(
            "You have {} matching skills - make sure these are prominently featured",
            matching.len()
        ));
    }

    suggestions
}
