//! ATS compatibility checks: formatting, keyword coverage against a job
//! description, and a yes/no ATS-friendliness verdict.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::resume::Resume;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

const KNOWN_TECH_TERMS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "sql",
    "aws",
    "docker",
    "kubernetes",
    "react",
    "angular",
];

const ACTION_VERBS: &[&str] = &["developed", "implemented", "managed", "led", "created", "improved"];

static CAPITALIZED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+\b").expect("capitalized word regex"));
static DOMAIN_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\w+\s+(?:development|engineering|management|analysis|design)\b")
        .expect("domain phrase regex")
});
static SKILLS_SECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)skills?[:\s]+(.*?)(?:\n\n|\n[A-Z]|$)").expect("skills section regex")
});
static QUANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%|\$\d+|\d+\+").expect("quantifiable regex"));

#[derive(Debug, Serialize)]
pub struct AtsReport {
    pub suggestions: Vec<String>,
    /// Keyword match against the job description; absent without one.
    pub match_score: Option<u8>,
    pub ats_friendly: bool,
}

/// Runs all ATS checks. Deterministic; keyword sets are ordered.
pub fn optimize(resume: &Resume, job_description: Option<&str>) -> AtsReport {
    let mut suggestions = check_formatting(resume);

    let match_score = match job_description {
        Some(jd) if !jd.trim().is_empty() => {
            suggestions.extend(suggest_missing_keywords(resume, jd));
            Some(match_score(resume, jd))
        }
        _ => None,
    };

    suggestions.extend(general_suggestions(resume));

    AtsReport {
        suggestions,
        match_score,
        ats_friendly: is_ats_friendly(resume),
    }
}

fn check_formatting(resume: &Resume) -> Vec<String> {
    let mut suggestions = Vec::new();

    if resume.raw_text.contains('|') || resume.raw_text.contains('\t') {
        suggestions
            .push("Avoid using tables - ATS systems may not parse them correctly".to_string());
    }

    suggestions.push(
        "Use standard fonts (Arial, Calibri, Times New Roman) for better ATS compatibility"
            .to_string(),
    );

    let text_lower = resume.raw_text.to_lowercase();
    let found = ["experience", "education", "skills", "summary"]
        .iter()
        .filter(|h| text_lower.contains(**h))
        .count();
    if found < 3 {
        suggestions
            .push("Ensure clear section headers (Experience, Education, Skills)".to_string());
    }

    suggestions
}

fn suggest_missing_keywords(resume: &Resume, job_description: &str) -> Vec<String> {
    let resume_text = resume.raw_text.to_lowercase();
    let keywords = extract_keywords(job_description);
    let missing: Vec<&str> = keywords
        .iter()
        .filter(|k| !resume_text.contains(k.as_str()))
        .take(5)
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        vec![]
    } else {
        vec![format!(
            "Consider adding these keywords from the job description: {}",
            missing.join(", ")
        )]
    }
}

/// Extracts up to 20 keywords: capitalized words, domain phrases, known
/// tech terms, and skills-section tokens, lowercased and deduped.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    let mut keywords = BTreeSet::new();

    for m in CAPITALIZED_RE.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if !STOP_WORDS.contains(&word.as_str()) {
            keywords.insert(word);
        }
    }

    for m in DOMAIN_PHRASE_RE.find_iter(text) {
        keywords.insert(m.as_str().to_lowercase());
    }

    let lower = text.to_lowercase();
    for term in KNOWN_TECH_TERMS {
        if lower.contains(term) {
            keywords.insert((*term).to_string());
        }
    }

    if let Some(caps) = SKILLS_SECTION_RE.captures(text) {
        for token in caps[1].split(|c: char| !c.is_alphanumeric()) {
            if token.len() > 3 {
                keywords.insert(token.to_lowercase());
            }
        }
    }

    keywords.into_iter().take(20).collect()
}

/// Share of job-description keywords present in the resume text, 0-100.
pub fn match_score(resume: &Resume, job_description: &str) -> u8 {
    let keywords = extract_keywords(job_description);
    if keywords.is_empty() {
        return 0;
    }
    let resume_text = resume.raw_text.to_lowercase();
    let matches = keywords.iter().filter(|k| resume_text.contains(k.as_str())).count();
    ((matches * 100) / keywords.len()).min(100) as u8
}

fn general_suggestions(resume: &Resume) -> Vec<String> {
    let mut suggestions = Vec::new();

    let quantifiable = QUANT_RE.find_iter(&resume.raw_text).count();
    if quantifiable < 3 {
        suggestions.push(
            "Add more quantifiable achievements (numbers, percentages, metrics)".to_string(),
        );
    }

    let text_lower = resume.raw_text.to_lowercase();
    let verb_count = ACTION_VERBS.iter().filter(|v| text_lower.contains(**v)).count();
    if verb_count < 5 {
        suggestions.push(
            "Use more strong action verbs (developed, implemented, managed, led, etc.)"
                .to_string(),
        );
    }

    if resume.fields.contact_info.email.is_none() {
        suggestions.push("Ensure email address is included".to_string());
    }
    if resume.fields.contact_info.phone.is_none() {
        suggestions.push("Ensure phone number is included".to_string());
    }
    if resume.fields.skills.len() < 5 {
        suggestions.push("List at least 5-10 relevant skills".to_string());
    }

    suggestions
}

fn is_ats_friendly(resume: &Resume) -> bool {
    let has_tables = resume.raw_text.contains('|') || resume.raw_text.contains('\t');
    resume.fields.contact_info.email.is_some()
        && resume.fields.contact_info.phone.is_some()
        && !resume.fields.experience.is_empty()
        && resume.fields.skills.len() >= 5
        && !has_tables
}
