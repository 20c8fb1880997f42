//! Formatting findings and safe in-place normalizations.
//!
//! `findings` reports issues without touching the resume;
//! `apply_improvements` performs the normalizations that are safe to do
//! automatically (whitespace, bullet glyphs, capitalization, summary
//! truncation) and describes each change it made.

use crate::models::resume::ResumeFields;

const SPECIAL_CHARS: &[char] = &['©', '®', '™', '•'];
const MAX_SUMMARY_CHARS: usize = 500;

/// Formatting issues that need the author's judgement to fix.
pub fn findings(fields: &ResumeFields, raw_text: &str) -> Vec<String> {
    let mut findings = Vec::new();
    findings.extend(spacing_findings(fields));
    findings.extend(consistency_findings(fields));
    findings.extend(ats_findings(raw_text));
    findings.extend(structure_findings(fields));
    findings
}

fn spacing_findings(fields: &ResumeFields) -> Vec<String> {
    let mut findings = Vec::new();

    let lengths: Vec<usize> = fields
        .experience
        .iter()
        .flat_map(|e| e.description.iter().map(|d| d.chars().count()))
        .collect();
    if !lengths.is_empty() {
        let avg = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
        if lengths.iter().any(|&l| (l as f64) < avg * 0.5) {
            findings
                .push("Some descriptions are too short - consider adding more detail".to_string());
        }
        if lengths.iter().any(|&l| (l as f64) > avg * 1.5) {
            findings.push("Some descriptions are too long - consider condensing".to_string());
        }
    }

    let consistent = fields.experience.iter().all(|exp| {
        let mut bullets = exp.description.iter().map(|d| starts_with_bullet(d));
        match bullets.next() {
            Some(first) => bullets.all(|b| b == first),
            None => true,
        }
    });
    if !consistent {
        findings
            .push("Inconsistent bullet point formatting - standardize bullet style".to_string());
    }

    findings
}

fn starts_with_bullet(text: &str) -> bool {
    text.starts_with('•') || text.starts_with('-')
}

fn consistency_findings(fields: &ResumeFields) -> Vec<String> {
    let mut findings = Vec::new();

    let formats: Vec<&str> = fields
        .experience
        .iter()
        .filter(|e| !e.start_date.is_empty())
        .map(|e| date_format(&e.start_date))
        .collect();
    let mut unique = formats.clone();
    unique.sort_unstable();
    unique.dedup();
    if unique.len() > 1 {
        findings.push(
            "Inconsistent date formats - use consistent format (e.g., 'MM/YYYY')".to_string(),
        );
    }

    let miscapitalized = fields.experience.iter().any(|e| {
        starts_lowercase(&e.position) || starts_lowercase(&e.company)
    });
    if miscapitalized {
        findings.push(
            "Ensure proper capitalization for position titles and company names".to_string(),
        );
    }

    findings
}

fn starts_lowercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_lowercase())
}

fn date_format(date: &str) -> &'static str {
    if date.contains('/') {
        "slash"
    } else if date.contains('-') {
        "dash"
    } else if date.len() == 4 && date.chars().all(|c| c.is_ascii_digit()) {
        "year_only"
    } else {
        "other"
    }
}

fn ats_findings(raw_text: &str) -> Vec<String> {
    let mut findings = Vec::new();

    if raw_text.contains('|') || raw_text.contains('\t') {
        findings.push(
            "Remove tables - use standard formatting for better ATS compatibility".to_string(),
        );
    }

    if raw_text.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        findings.push(
            "Replace special characters with standard alternatives for ATS compatibility"
                .to_string(),
        );
    }

    let text_lower = raw_text.to_lowercase();
    let found = ["experience", "education", "skills", "summary"]
        .iter()
        .filter(|h| text_lower.contains(**h))
        .count();
    if found < 3 {
        findings.push(
            "Ensure clear section headers are present (Experience, Education, Skills)".to_string(),
        );
    }

    findings
}

fn structure_findings(fields: &ResumeFields) -> Vec<String> {
    let mut findings = Vec::new();

    if fields
        .summary
        .as_ref()
        .is_some_and(|s| s.chars().count() > MAX_SUMMARY_CHARS)
    {
        findings.push("Summary is too long - keep it under 3-4 sentences".to_string());
    }

    if fields.experience.len() > 1 {
        let years: Vec<Option<i32>> = fields
            .experience
            .iter()
            .map(|e| e.start_date.get(..4).and_then(|y| y.parse().ok()))
            .collect();
        let out_of_order = years.windows(2).any(|pair| match (pair[0], pair[1]) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        });
        if out_of_order {
            findings.push(
                "Ensure experience is listed in reverse chronological order (most recent first)"
                    .to_string(),
            );
        }
    }

    findings
}

/// Mutates the fields in place with safe normalizations and reports what
/// changed. Idempotent: a second call returns no improvements.
pub fn apply_improvements(fields: &mut ResumeFields) -> Vec<String> {
    let mut improvements = Vec::new();

    let mut stripped_bullets = false;
    let mut trimmed = false;
    for exp in &mut fields.experience {
        for desc in &mut exp.description {
            if desc.trim() != desc {
                trimmed = true;
            }
            let mut cleaned = desc.trim().to_string();
            for prefix in ["•", "-"] {
                if let Some(rest) = cleaned.strip_prefix(prefix) {
                    cleaned = rest.trim_start().to_string();
                    stripped_bullets = true;
                    break;
                }
            }
            if cleaned != *desc {
                *desc = cleaned;
            }
        }
    }
    if stripped_bullets {
        improvements.push("Standardized bullet formatting in experience descriptions".to_string());
    }
    if trimmed {
        improvements.push("Trimmed stray whitespace from descriptions".to_string());
    }

    let mut capitalized = false;
    for exp in &mut fields.experience {
        if capitalize_in_place(&mut exp.position) {
            capitalized = true;
        }
        if capitalize_in_place(&mut exp.company) {
            capitalized = true;
        }
    }
    if capitalized {
        improvements.push("Capitalized position titles and company names".to_string());
    }

    if let Some(summary) = &mut fields.summary {
        let trimmed_summary = summary.trim();
        if trimmed_summary.len() != summary.len() {
            *summary = trimmed_summary.to_string();
        }
        if summary.chars().count() > MAX_SUMMARY_CHARS {
            let truncated: String = summary.chars().take(MAX_SUMMARY_CHARS - 3).collect();
            *summary = format!("{}...", truncated.trim_end());
            improvements.push("Truncated overly long summary".to_string());
        }
    }

    improvements
}

fn capitalize_in_place(text: &mut String) -> bool {
    let Some(first) = text.chars().next() else {
        return false;
    };
    if !first.is_lowercase() {
        return false;
    }
    let rest: String = text.chars().skip(1).collect();
    *text = first.to_uppercase().chain(rest.chars()).collect();
    true
}
