//! Interview and cover-letter coaching, delegated to the LLM.
//!
//! Question generation salvages a usable response where it can and falls
//! back to the built-in question bank when the model output cannot be
//! parsed. Transport failures surface as upstream errors.

pub mod handlers;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::{prompts, strip_json_fences, LlmClient};
use crate::models::resume::Resume;

const DEFAULT_TONE: &str = "professional";
const DEFAULT_LENGTH: &str = "medium";
const DEFAULT_QUESTION_TYPES: &[&str] = &["behavioral", "technical", "situational"];

#[derive(Debug, Serialize)]
pub struct CoverLetter {
    pub cover_letter: String,
    pub tone: String,
    pub length: String,
    pub company_name: Option<String>,
    pub word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct InterviewQuestions {
    /// Category name to question list, in category order.
    pub questions: BTreeMap<String, Vec<String>>,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct InterviewAnswer {
    pub question: String,
    pub suggested_answer: String,
    pub key_points: Vec<String>,
    pub tips: Vec<String>,
}

/// Candidate block shared by the coaching prompts.
fn candidate_block(resume: &Resume) -> String {
    let skills: Vec<&str> = resume
        .fields
        .skills
        .iter()
        .take(10)
        .map(|s| s.name.as_str())
        .collect();
    format!(
        "Name: {}\nEmail: {}\nSummary: {}\nPositions held: {}\nKey Skills: {}",
        resume.fields.contact_info.name,
        resume
            .fields
            .contact_info
            .email
            .as_deref()
            .unwrap_or("Not provided"),
        resume.fields.summary.as_deref().unwrap_or("Not provided"),
        resume.fields.experience.len(),
        skills.join(", "),
    )
}

fn length_guidance(length: &str) -> &'static str {
    match length {
        "short" => "Keep it concise, around 200-250 words",
        "long" => "Write a detailed cover letter, around 500-600 words",
        _ => "Write a standard length cover letter, around 300-400 words",
    }
}

fn tone_guidance(tone: &str) -> &'static str {
    match tone {
        "friendly" => "Use a warm, approachable tone while remaining professional",
        "formal" => "Use a formal, traditional business letter tone",
        _ => "Use a professional, confident tone",
    }
}

pub async fn generate_cover_letter(
    llm: &LlmClient,
    resume: &Resume,
    job_description: &str,
    company_name: Option<String>,
    tone: Option<String>,
    length: Option<String>,
) -> Result<CoverLetter, AppError> {
    let tone = tone.unwrap_or_else(|| DEFAULT_TONE.to_string());
    let length = length.unwrap_or_else(|| DEFAULT_LENGTH.to_string());
    let company_line = company_name
        .as_deref()
        .map(|c| format!("Company: {c}\n"))
        .unwrap_or_default();

    let prompt = prompts::COVER_LETTER_PROMPT_TEMPLATE
        .replace("{tone_guidance}", tone_guidance(&tone))
        .replace("{length_guidance}", length_guidance(&length))
        .replace("{job_description}", job_description)
        .replace("{candidate}", &candidate_block(resume))
        .replace("{company_line}", &company_line);

    let text = llm
        .call(&prompt, prompts::COVER_LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Upstream(format!("Cover letter generation failed: {e}")))?;
    let text = text.trim().to_string();
    let word_count = text.split_whitespace().count();

    Ok(CoverLetter {
        cover_letter: text,
        tone,
        length,
        company_name,
        word_count,
    })
}

pub async fn generate_interview_questions(
    llm: &LlmClient,
    resume: &Resume,
    job_description: &str,
    question_types: Option<Vec<String>>,
) -> Result<InterviewQuestions, AppError> {
    let categories: Vec<String> = question_types
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| {
            DEFAULT_QUESTION_TYPES
                .iter()
                .map(|t| (*t).to_string())
                .collect()
        });

    let prompt = prompts::INTERVIEW_QUESTIONS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{candidate}", &candidate_block(resume))
        .replace("{categories}", &categories.join(", "));

    let text = llm
        .call(&prompt, prompts::INTERVIEW_QUESTIONS_SYSTEM)
        .await
        .map_err(|e| AppError::Upstream(format!("Interview question generation failed: {e}")))?;

    let questions = parse_question_response(&text)
        .unwrap_or_else(|| question_bank(resume, &categories));
    let total_questions = questions.values().map(Vec::len).sum();

    Ok(InterviewQuestions {
        questions,
        total_questions,
    })
}

/// Parses the JSON contract `{category: [question, ...]}`. `None` when
/// the response cannot be salvaged into at least one non-empty category.
fn parse_question_response(text: &str) -> Option<BTreeMap<String, Vec<String>>> {
    let stripped = strip_json_fences(text);
    let parsed: BTreeMap<String, Vec<String>> = serde_json::from_str(stripped).ok()?;
    let filtered: BTreeMap<String, Vec<String>> = parsed
        .into_iter()
        .filter(|(_, qs)| !qs.is_empty())
        .collect();
    if filtered.is_empty() {
        None
    } else {
        Some(filtered)
    }
}

/// Built-in questions used when the model response is unusable.
fn question_bank(resume: &Resume, categories: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut questions = BTreeMap::new();

    for category in categories {
        match category.as_str() {
            "behavioral" => {
                questions.insert(
                    category.clone(),
                    vec![
                        "Tell me about a time you had to work under pressure.".to_string(),
                        "Describe a situation where you had to solve a complex problem."
                            .to_string(),
                        "Give an example of when you worked effectively in a team.".to_string(),
                        "Tell me about a time you had to adapt to a significant change."
                            .to_string(),
                    ],
                );
            }
            "technical" => {
                let primary_skill = resume
                    .fields
                    .skills
                    .first()
                    .map(|s| s.name.as_str())
                    .unwrap_or("your primary skill");
                questions.insert(
                    category.clone(),
                    vec![
                        format!("Explain your experience with {primary_skill}."),
                        "Describe a technical project you're particularly proud of.".to_string(),
                        "How do you stay current with industry trends?".to_string(),
                        "Walk me through your approach to debugging a complex issue.".to_string(),
                    ],
                );
            }
            "situational" => {
                questions.insert(
                    category.clone(),
                    vec![
                        "What would you do if you disagreed with your manager?".to_string(),
                        "How would you handle a tight deadline with limited resources?"
                            .to_string(),
                        "Describe how you would onboard a new team member.".to_string(),
                        "What would you do if a project was behind schedule?".to_string(),
                    ],
                );
            }
            "general" => {
                questions.insert(
                    category.clone(),
                    vec![
                        "Tell me about yourself.".to_string(),
                        "Why do you want to work here?".to_string(),
                        "What are your greatest strengths?".to_string(),
                        "What are your weaknesses?".to_string(),
                        "Where do you see yourself in 5 years?".to_string(),
                    ],
                );
            }
            _ => {}
        }
    }

    questions
}

pub async fn generate_interview_answer(
    llm: &LlmClient,
    resume: &Resume,
    question: &str,
    job_description: Option<&str>,
) -> Result<InterviewAnswer, AppError> {
    let job_context = job_description
        .map(|jd| {
            let truncated: String = jd.chars().take(500).collect();
            format!("Job Description Context: {truncated}\n")
        })
        .unwrap_or_default();

    let prompt = prompts::INTERVIEW_ANSWER_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{candidate}", &candidate_block(resume))
        .replace("{job_context}", &job_context);

    let text = llm
        .call(&prompt, prompts::INTERVIEW_ANSWER_SYSTEM)
        .await
        .map_err(|e| AppError::Upstream(format!("Interview answer generation failed: {e}")))?;

    Ok(answer_from_response(question, &text))
}

/// Splits the model response into answer, key points, and tips; bulleted
/// sections are recognized by their headings.
fn answer_from_response(question: &str, text: &str) -> InterviewAnswer {
    let key_points = section_bullets(text, "key points");
    let tips = section_bullets(text, "tips");
    let answer = leading_answer(text);

    InterviewAnswer {
        question: question.to_string(),
        suggested_answer: if answer.is_empty() {
            text.trim().to_string()
        } else {
            answer
        },
        key_points,
        tips: if tips.is_empty() {
            vec![
                "Be specific".to_string(),
                "Use examples from your experience".to_string(),
            ]
        } else {
            tips
        },
    }
}

/// Text before the first recognized section heading.
fn leading_answer(text: &str) -> String {
    let mut answer_lines = Vec::new();
    for line in text.lines() {
        let lower = line.trim().to_lowercase();
        if lower.starts_with("key points") || lower.starts_with("tips") {
            break;
        }
        answer_lines.push(line);
    }
    answer_lines.join("\n").trim().to_string()
}

fn section_bullets(text: &str, heading: &str) -> Vec<String> {
    let mut bullets = Vec::new();
    let mut in_section = false;
    for line in text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();
        if lower.starts_with(heading) {
            in_section = true;
            continue;
        }
        if in_section {
            if let Some(rest) = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .or_else(|| trimmed.strip_prefix("• "))
            {
                bullets.push(rest.trim().to_string());
            } else if !trimmed.is_empty() {
                break;
            }
        }
    }
    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, ResumeFields, Skill};
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_resume() -> Resume {
        Resume {
            id: Uuid::new_v4(),
            filename: "r.pdf".into(),
            uploaded_at: Utc::now(),
            fields: ResumeFields {
                contact_info: ContactInfo {
                    name: "Jane Doe".into(),
                    ..Default::default()
                },
                skills: vec![Skill::named("Rust"), Skill::named("SQL")],
                ..Default::default()
            },
            raw_text: String::new(),
            industry: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_parse_question_response_valid_json() {
        let text = r#"{"behavioral": ["Q1", "Q2"], "technical": ["Q3"]}"#;
        let parsed = parse_question_response(text).unwrap();
        assert_eq!(parsed["behavioral"].len(), 2);
        assert_eq!(parsed["technical"], vec!["Q3"]);
    }

    #[test]
    fn test_parse_question_response_rejects_prose_and_empty() {
        assert!(parse_question_response("Here are some questions...").is_none());
        assert!(parse_question_response(r#"{"behavioral": []}"#).is_none());
    }

    #[test]
    fn test_question_bank_uses_primary_skill() {
        let resume = sample_resume();
        let bank = question_bank(&resume, &["technical".to_string()]);
        assert!(bank["technical"][0].contains("Rust"));
    }

    #[test]
    fn test_question_bank_skips_unknown_categories() {
        let resume = sample_resume();
        let bank = question_bank(&resume, &["astrology".to_string(), "general".to_string()]);
        assert_eq!(bank.len(), 1);
        assert!(bank.contains_key("general"));
    }

    #[test]
    fn test_answer_salvage_splits_sections() {
        let text = "You should lead with your systems background.\n\n\
            Key points:\n- Mention the migration project\n- Quantify the impact\n\n\
            Tips:\n- Keep it under two minutes";
        let answer = answer_from_response("Tell me about yourself.", text);
        assert!(answer.suggested_answer.contains("systems background"));
        assert!(!answer.suggested_answer.to_lowercase().contains("key points"));
        assert_eq!(answer.key_points.len(), 2);
        assert_eq!(answer.tips, vec!["Keep it under two minutes"]);
    }

    #[test]
    fn test_answer_without_sections_keeps_full_text() {
        let answer = answer_from_response("Q", "Just one paragraph of advice.");
        assert_eq!(answer.suggested_answer, "Just one paragraph of advice.");
        assert!(answer.key_points.is_empty());
        assert_eq!(answer.tips.len(), 2);
    }

    #[test]
    fn test_guidance_defaults() {
        assert!(length_guidance("unknown").contains("300-400"));
        assert!(tone_guidance("unknown").contains("professional"));
    }
}
