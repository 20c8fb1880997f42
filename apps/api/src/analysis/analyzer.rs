//! Rule-based resume analysis. Produces the metrics, strengths,
//! weaknesses, and the additive ATS score that the LLM layer starts from
//! and falls back to.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{Datelike, Utc};
use regex::Regex;

use crate::analysis::{Analysis, KeywordAnalysis, Metrics};
use crate::models::resume::Resume;

const STRONG_ACTION_VERBS: &[&str] = &[
    "achieved",
    "improved",
    "increased",
    "decreased",
    "reduced",
    "developed",
    "created",
    "designed",
    "implemented",
    "managed",
    "led",
    "coordinated",
    "executed",
    "delivered",
    "optimized",
    "enhanced",
    "streamlined",
    "established",
    "launched",
    "built",
];

const WEAK_ACTION_VERBS: &[&str] =
    &["worked", "did", "made", "helped", "assisted", "responsible for"];

const VAGUE_WORDS: &[&str] = &["various", "many", "some", "several", "assisted with"];

const IMPORTANT_KEYWORDS: &[&str] = &[
    "experience",
    "skills",
    "education",
    "certification",
    "project",
    "achievement",
    "leadership",
    "management",
    "development",
    "implementation",
    "optimization",
    "analysis",
];

static QUANTIFIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+%|\$\d+|\d+\+|\d+\s*(years|months|people|projects|clients|users)")
        .expect("quantifiable regex")
});

/// Runs the full heuristic analysis. Deterministic and infallible; the
/// score is additive and capped at 100 (0 for an empty resume).
pub fn analyze(resume: &Resume) -> Analysis {
    let metrics = calculate_metrics(resume);

    let mut strengths = Vec::new();
    strengths.extend(quantifiable_strengths(&metrics));
    strengths.extend(action_verb_strengths(resume));
    strengths.extend(structure_strengths(resume));

    let mut weaknesses = Vec::new();
    weaknesses.extend(missing_elements(resume));
    weaknesses.extend(weak_language(resume));
    weaknesses.extend(formatting_issues(resume));

    let ats_score = ats_score(resume, &metrics);
    let keyword_analysis = keyword_analysis(resume);

    Analysis {
        ats_score,
        strengths,
        weaknesses,
        suggestions: Vec::new(),
        metrics,
        keyword_analysis,
    }
}

fn calculate_metrics(resume: &Resume) -> Metrics {
    let current_year = Utc::now().year() as i64;
    let mut total_experience_years = 0;
    for exp in &resume.fields.experience {
        let start_year = leading_year(&exp.start_date);
        let end_year = exp
            .end_date
            .as_deref()
            .and_then(|d| trailing_year(d))
            .unwrap_or(current_year);
        if let Some(start) = start_year {
            total_experience_years += (end_year - start).max(0);
        }
    }

    let mut quantifiable = 0;
    let mut desc_total = 0usize;
    let mut desc_count = 0usize;
    for exp in &resume.fields.experience {
        for desc in &exp.description {
            if QUANTIFIABLE_RE.is_match(desc) {
                quantifiable += 1;
            }
            desc_total += desc.chars().count();
            desc_count += 1;
        }
    }

    Metrics {
        total_experience_years,
        number_of_positions: resume.fields.experience.len(),
        number_of_skills: resume.fields.skills.len(),
        number_of_certifications: resume.fields.certifications.len(),
        has_summary: resume.fields.summary.is_some(),
        quantifiable_achievements: quantifiable,
        text_length: resume.raw_text.chars().count(),
        average_description_length: if desc_count > 0 {
            desc_total as f64 / desc_count as f64
        } else {
            0.0
        },
    }
}

fn leading_year(date: &str) -> Option<i64> {
    date.split_whitespace()
        .find_map(|token| token.parse::<i64>().ok())
        .filter(|y| (1900..=2100).contains(y))
}

fn trailing_year(date: &str) -> Option<i64> {
    date.split_whitespace()
        .rev()
        .find_map(|token| token.parse::<i64>().ok())
        .filter(|y| (1900..=2100).contains(y))
}

fn quantifiable_strengths(metrics: &Metrics) -> Vec<String> {
    let count = metrics.quantifiable_achievements;
    if count >= 3 {
        vec![format!(
            "Strong use of quantifiable achievements ({count} found)"
        )]
    } else if count > 0 {
        vec![format!(
            "Some quantifiable achievements present ({count} found)"
        )]
    } else {
        vec![]
    }
}

fn action_verb_strengths(resume: &Resume) -> Vec<String> {
    let mut strong = 0;
    let mut weak = 0;
    for exp in &resume.fields.experience {
        for desc in &exp.description {
            let lower = desc.to_lowercase();
            strong += STRONG_ACTION_VERBS.iter().filter(|v| lower.contains(**v)).count();
            weak += WEAK_ACTION_VERBS.iter().filter(|v| lower.contains(**v)).count();
        }
    }
    if strong > weak * 2 && strong > 0 {
        vec!["Excellent use of strong action verbs".to_string()]
    } else if strong > weak {
        vec!["Good use of action verbs".to_string()]
    } else {
        vec![]
    }
}

fn structure_strengths(resume: &Resume) -> Vec<String> {
    let mut strengths = Vec::new();
    if resume.fields.summary.is_some() {
        strengths.push("Professional summary present".to_string());
    }
    if resume.fields.experience.len() >= 2 {
        strengths.push("Adequate work experience listed".to_string());
    }
    if resume.fields.skills.len() >= 5 {
        strengths.push("Good variety of skills".to_string());
    }
    if resume.fields.contact_info.email.is_some() {
        strengths.push("Contact information complete".to_string());
    }
    strengths
}

fn missing_elements(resume: &Resume) -> Vec<String> {
    let mut weaknesses = Vec::new();
    if resume.fields.summary.is_none() {
        weaknesses.push("Missing professional summary".to_string());
    }
    if resume.fields.experience.is_empty() {
        weaknesses.push("No work experience listed".to_string());
    }
    if resume.fields.skills.len() < 5 {
        weaknesses.push("Limited skills listed (consider adding more)".to_string());
    }
    if resume.fields.contact_info.email.is_none() {
        weaknesses.push("Missing email address".to_string());
    }
    if resume.fields.contact_info.phone.is_none() {
        weaknesses.push("Missing phone number".to_string());
    }
    weaknesses
}

fn weak_language(resume: &Resume) -> Vec<String> {
    let mut weaknesses = Vec::new();
    let mut weak_count = 0;
    let mut vague_count = 0;
    for exp in &resume.fields.experience {
        for desc in &exp.description {
            let lower = desc.to_lowercase();
            if WEAK_ACTION_VERBS.iter().any(|v| lower.contains(v)) {
                weak_count += 1;
            }
            if VAGUE_WORDS.iter().any(|w| lower.contains(w)) {
                vague_count += 1;
            }
        }
    }
    if weak_count > 3 {
        weaknesses.push("Too many weak action verbs (consider using stronger verbs)".to_string());
    }
    if vague_count > 2 {
        weaknesses.push("Vague language detected (be more specific)".to_string());
    }
    weaknesses
}

fn formatting_issues(resume: &Resume) -> Vec<String> {
    let mut weaknesses = Vec::new();
    let text_length = resume.raw_text.chars().count();
    if text_length > 2000 {
        weaknesses.push("Resume may be too long (consider condensing)".to_string());
    } else if text_length > 0 && text_length < 300 {
        weaknesses.push("Resume may be too short (add more detail)".to_string());
    }

    let lengths: Vec<usize> = resume
        .fields
        .experience
        .iter()
        .flat_map(|e| e.description.iter().map(|d| d.chars().count()))
        .collect();
    if !lengths.is_empty() {
        let avg = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
        if lengths
            .iter()
            .any(|&l| (l as f64 - avg).abs() > avg * 0.5)
        {
            weaknesses.push("Inconsistent description lengths (aim for consistency)".to_string());
        }
    }
    weaknesses
}

/// Additive ATS score: contact info 20, structure 30, content quality 30,
/// formatting 20, capped at 100.
fn ats_score(resume: &Resume, metrics: &Metrics) -> u8 {
    let mut score: u32 = 0;

    if resume.fields.contact_info.email.is_some() {
        score += 10;
    }
    if resume.fields.contact_info.phone.is_some() {
        score += 10;
    }

    if resume.fields.summary.is_some() {
        score += 10;
    }
    if !resume.fields.experience.is_empty() {
        score += 10;
    }
    if resume.fields.skills.len() >= 5 {
        score += 10;
    }

    if metrics.quantifiable_achievements >= 3 {
        score += 15;
    } else if metrics.quantifiable_achievements > 0 {
        score += 8;
    }
    if metrics.average_description_length > 50.0 {
        score += 15;
    }

    let len = metrics.text_length;
    if (500..=2000).contains(&len) {
        score += 20;
    } else if (300..500).contains(&len) || (2001..=3000).contains(&len) {
        score += 10;
    }

    score.min(100) as u8
}

fn keyword_analysis(resume: &Resume) -> KeywordAnalysis {
    if resume.raw_text.is_empty() {
        return KeywordAnalysis::default();
    }
    let text_lower = resume.raw_text.to_lowercase();

    let mut important_keywords = HashMap::new();
    for keyword in IMPORTANT_KEYWORDS {
        let count = text_lower.matches(keyword).count();
        if count > 0 {
            important_keywords.insert((*keyword).to_string(), count);
        }
    }

    let mut skill_keywords = HashMap::new();
    for skill in &resume.fields.skills {
        let count = text_lower.matches(&skill.name.to_lowercase()).count();
        skill_keywords.insert(skill.name.clone(), count);
    }

    let total_unique_keywords = important_keywords.len() + skill_keywords.len();
    KeywordAnalysis {
        important_keywords,
        skill_keywords,
        total_unique_keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, Experience, Resume, ResumeFields, Skill};
    use chrono::Utc;
    use uuid::Uuid;

    fn resume_with(fields: ResumeFields, raw_text: &str) -> Resume {
        Resume {
            id: Uuid::new_v4(),
            filename: "resume.pdf".into(),
            uploaded_at: Utc::now(),
            fields,
            raw_text: raw_text.into(),
            industry: None,
            tags: vec![],
        }
    }

    fn strong_fields() -> ResumeFields {
        ResumeFields {
            contact_info: ContactInfo {
                name: "Jane Doe".into(),
                email: Some("jane@example.com".into()),
                phone: Some("555-123-4567".into()),
                ..Default::default()
            },
            summary: Some("Senior engineer focused on reliability.".into()),
            experience: vec![Experience {
                company: "Acme".into(),
                position: "Engineer".into(),
                start_date: "2018".into(),
                end_date: Some("2022".into()),
                current: false,
                description: vec![
                    "Improved deploy reliability by 40% across 12 services in production".into(),
                    "Reduced infra spend by $200 per month through rightsizing compute".into(),
                    "Launched monitoring stack used by 30 people on the platform team".into(),
                ],
            }],
            skills: ["Rust", "Python", "Kubernetes", "SQL", "AWS", "Docker"]
                .iter()
                .map(|s| Skill::named(*s))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_score_is_zero_for_empty_resume() {
        let resume = resume_with(ResumeFields::default(), "");
        let analysis = analyze(&resume);
        assert_eq!(analysis.ats_score, 0);
        assert!(!analysis.weaknesses.is_empty());
    }

    #[test]
    fn test_score_never_exceeds_100() {
        let raw = "x".repeat(1500);
        let resume = resume_with(strong_fields(), &raw);
        let analysis = analyze(&resume);
        assert!(analysis.ats_score <= 100);
        // contact 20 + structure 30 + quantifiable 15 + desc length 15 + formatting 20
        assert_eq!(analysis.ats_score, 100);
    }

    #[test]
    fn test_quantifiable_achievements_detected() {
        let resume = resume_with(strong_fields(), "short text");
        let analysis = analyze(&resume);
        assert_eq!(analysis.metrics.quantifiable_achievements, 3);
        assert!(analysis
            .strengths
            .iter()
            .any(|s| s.contains("quantifiable achievements")));
    }

    #[test]
    fn test_experience_years_summed_from_date_ranges() {
        let resume = resume_with(strong_fields(), "text");
        let analysis = analyze(&resume);
        assert_eq!(analysis.metrics.total_experience_years, 4);
    }

    #[test]
    fn test_missing_contact_info_flagged() {
        let resume = resume_with(ResumeFields::default(), "some resume text");
        let analysis = analyze(&resume);
        assert!(analysis.weaknesses.iter().any(|w| w.contains("email")));
        assert!(analysis.weaknesses.iter().any(|w| w.contains("phone")));
    }

    #[test]
    fn test_keyword_analysis_counts_occurrences() {
        let mut fields = ResumeFields::default();
        fields.skills.push(Skill::named("Rust"));
        let resume = resume_with(fields, "Experience with Rust. More rust experience.");
        let analysis = analyze(&resume);
        assert_eq!(analysis.keyword_analysis.skill_keywords["Rust"], 2);
        assert_eq!(
            analysis.keyword_analysis.important_keywords["experience"],
            2
        );
    }
}
