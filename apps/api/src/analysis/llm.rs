//! LLM-backed resume analysis layered over the heuristic pass.
//!
//! The model response is parsed strictly first, then salvaged from
//! free text if the JSON contract was not honored. Any field the model
//! omits is filled from the heuristic analysis so the response shape
//! never degrades.

use serde::Deserialize;

use crate::analysis::{analyzer, clamp_score, Analysis};
use crate::errors::AppError;
use crate::llm_client::{prompts, strip_json_fences, LlmClient};
use crate::models::resume::Resume;

/// Model-facing response schema. Every field is optional so a partial
/// response still salvages what it can.
#[derive(Debug, Deserialize)]
struct LlmAnalysis {
    ats_score: Option<f64>,
    strengths: Option<Vec<String>>,
    weaknesses: Option<Vec<String>>,
    suggestions: Option<Vec<String>>,
}

/// Full analysis: heuristic pass first, then LLM refinement.
pub async fn analyze_resume(
    llm: &LlmClient,
    resume: &Resume,
    job_description: Option<&str>,
) -> Result<Analysis, AppError> {
    let mut analysis = analyzer::analyze(resume);

    let job_context = match job_description {
        Some(jd) if !jd.trim().is_empty() => {
            format!("- Weigh relevance against this job description:\n{jd}\n")
        }
        _ => String::new(),
    };
    let prompt = prompts::ANALYSIS_PROMPT_TEMPLATE
        .replace("{resume_text}", &resume.raw_text)
        .replace("{job_context}", &job_context)
        .replace("{heuristic_score}", &analysis.ats_score.to_string());

    let text = llm
        .call(&prompt, prompts::ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Upstream(format!("LLM analysis failed: {e}")))?;

    let parsed = parse_llm_analysis(&text);
    if let Some(score) = parsed.ats_score {
        analysis.ats_score = clamp_score(score);
    }
    if let Some(strengths) = parsed.strengths {
        if !strengths.is_empty() {
            analysis.strengths = strengths;
        }
    }
    if let Some(weaknesses) = parsed.weaknesses {
        if !weaknesses.is_empty() {
            analysis.weaknesses = weaknesses;
        }
    }
    match parsed.suggestions {
        Some(suggestions) if !suggestions.is_empty() => analysis.suggestions = suggestions,
        _ => analysis.suggestions = fallback_suggestions(&analysis),
    }

    Ok(analysis)
}

/// Strict JSON parse first; salvage headed free text second.
fn parse_llm_analysis(text: &str) -> LlmAnalysis {
    let stripped = strip_json_fences(text);
    if let Ok(parsed) = serde_json::from_str::<LlmAnalysis>(stripped) {
        return parsed;
    }

    LlmAnalysis {
        ats_score: None,
        strengths: heading_items(text, "strengths"),
        weaknesses: heading_items(text, "weaknesses"),
        suggestions: heading_items(text, "suggestions"),
    }
}

/// Collects bullet lines under a `Heading:` line, case-insensitively,
/// until the next heading-looking line.
fn heading_items(text: &str, heading: &str) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut in_section = false;
    for line in text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with(heading) && lower.trim_start_matches(heading).starts_with(':') {
            in_section = true;
            continue;
        }
        if in_section {
            if trimmed.ends_with(':') && !trimmed.starts_with(['-', '*', '•']) {
                break;
            }
            if let Some(item) = strip_bullet(trimmed) {
                items.push(item.to_string());
            }
        }
    }
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

fn strip_bullet(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .or_else(|| {
            line.split_once(". ")
                .filter(|(n, _)| n.chars().all(|c| c.is_ascii_digit()) && !n.is_empty())
                .map(|(_, rest)| rest)
        })?;
    let rest = rest.trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Suggestions derived from heuristic weaknesses when the model gives none.
pub(crate) fn fallback_suggestions(analysis: &Analysis) -> Vec<String> {
    let mut suggestions: Vec<String> = analysis
        .weaknesses
        .iter()
        .map(|w| format!("Address: {w}"))
        .collect();
    if suggestions.is_empty() {
        suggestions.push("Tailor the resume to each job description you apply for".to_string());
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strict_json() {
        let text = r#"{"ats_score": 81, "strengths": ["A"], "weaknesses": ["B"], "suggestions": ["C"]}"#;
        let parsed = parse_llm_analysis(text);
        assert_eq!(parsed.ats_score, Some(81.0));
        assert_eq!(parsed.strengths.unwrap(), vec!["A"]);
    }

    #[test]
    fn test_parse_fenced_json() {
        let text = "```json\n{\"ats_score\": 55}\n```";
        let parsed = parse_llm_analysis(text);
        assert_eq!(parsed.ats_score, Some(55.0));
        assert!(parsed.strengths.is_none());
    }

    #[test]
    fn test_salvage_headed_free_text() {
        let text = "Here is my analysis.\n\
            Strengths:\n- Clear summary\n- Good skills section\n\
            Weaknesses:\n- No metrics\n\
            Suggestions:\n1. Add numbers to achievements\n";
        let parsed = parse_llm_analysis(text);
        assert!(parsed.ats_score.is_none());
        assert_eq!(
            parsed.strengths.unwrap(),
            vec!["Clear summary", "Good skills section"]
        );
        assert_eq!(parsed.weaknesses.unwrap(), vec!["No metrics"]);
        assert_eq!(
            parsed.suggestions.unwrap(),
            vec!["Add numbers to achievements"]
        );
    }

    #[test]
    fn test_salvage_nothing_from_plain_prose() {
        let parsed = parse_llm_analysis("The resume looks fine overall.");
        assert!(parsed.ats_score.is_none());
        assert!(parsed.strengths.is_none());
        assert!(parsed.suggestions.is_none());
    }

    #[test]
    fn test_strip_bullet_mixed_markers() {
        assert_eq!(strip_bullet("- first"), Some("first"));
        assert_eq!(strip_bullet("* second"), Some("second"));
        assert_eq!(strip_bullet("• third"), Some("third"));
        assert_eq!(strip_bullet("2. fourth"), Some("fourth"));
        assert_eq!(strip_bullet("not a bullet"), None);
    }

    #[test]
    fn test_fallback_suggestions_from_weaknesses() {
        let analysis = Analysis {
            ats_score: 40,
            strengths: vec![],
            weaknesses: vec!["Missing email address".into()],
            suggestions: vec![],
            metrics: Default::default(),
            keyword_analysis: Default::default(),
        };
        let suggestions = fallback_suggestions(&analysis);
        assert_eq!(suggestions, vec!["Address: Missing email address"]);
    }
}
