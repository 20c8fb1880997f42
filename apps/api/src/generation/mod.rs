//! Document generation: renders a resume's structured fields into DOCX
//! or PDF using a template's layout parameters.

pub mod docx;
pub mod handlers;
pub mod pdf;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::template::LayoutParams;

/// Recognized output formats. Anything else is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Docx,
    Pdf,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_lowercase().as_str() {
            "docx" => Ok(OutputFormat::Docx),
            "pdf" => Ok(OutputFormat::Pdf),
            other => Err(AppError::UnsupportedFormat(format!(
                "Format must be 'docx' or 'pdf', got '{other}'"
            ))),
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Pdf => "pdf",
        }
    }
}

/// Renders the resume in the requested format.
pub fn render(
    resume: &Resume,
    layout: &LayoutParams,
    format: OutputFormat,
) -> Result<Vec<u8>, AppError> {
    match format {
        OutputFormat::Docx => docx::render(resume, layout),
        OutputFormat::Pdf => pdf::render(resume, layout),
    }
}

/// Attachment filename derived from the contact name, e.g.
/// `Jane_Doe_resume.pdf`.
pub fn attachment_filename(resume: &Resume, format: OutputFormat) -> String {
    let name = resume.fields.contact_info.name.trim();
    let base = if name.is_empty() { "resume" } else { name };
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{safe}_resume.{}", format.extension())
}

/// Section heading text honoring the uppercase layout knob.
fn section_heading(layout: &LayoutParams, title: &str) -> String {
    if layout.section_headers_uppercase {
        title.to_uppercase()
    } else {
        title.to_string()
    }
}

/// `start - end` with `Present` for open-ended ranges.
fn date_range(start: &str, end: Option<&str>) -> String {
    format!("{start} - {}", end.unwrap_or("Present"))
}

/// Contact fields joined with ` | `, skipping absent ones.
fn contact_line(resume: &Resume) -> String {
    let contact = &resume.fields.contact_info;
    [
        contact.email.as_deref(),
        contact.phone.as_deref(),
        contact.location.as_deref(),
        contact.linkedin.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, ResumeFields};
    use chrono::Utc;
    use uuid::Uuid;

    fn resume_named(name: &str) -> Resume {
        Resume {
            id: Uuid::new_v4(),
            filename: "in.pdf".into(),
            uploaded_at: Utc::now(),
            fields: ResumeFields {
                contact_info: ContactInfo {
                    name: name.into(),
                    email: Some("a@b.c".into()),
                    ..Default::default()
                },
                ..Default::default()
            },
            raw_text: String::new(),
            industry: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::parse("docx").unwrap(), OutputFormat::Docx);
        assert_eq!(OutputFormat::parse("PDF").unwrap(), OutputFormat::Pdf);
        assert!(matches!(
            OutputFormat::parse("txt"),
            Err(AppError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            OutputFormat::parse("doc"),
            Err(AppError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_attachment_filename_sanitizes_name() {
        let resume = resume_named("Jane Doe");
        assert_eq!(
            attachment_filename(&resume, OutputFormat::Pdf),
            "Jane_Doe_resume.pdf"
        );
        let resume = resume_named("");
        assert_eq!(
            attachment_filename(&resume, OutputFormat::Docx),
            "resume_resume.docx"
        );
    }

    #[test]
    fn test_date_range_present_fallback() {
        assert_eq!(date_range("2020", None), "2020 - Present");
        assert_eq!(date_range("2020", Some("2022")), "2020 - 2022");
    }

    #[test]
    fn test_contact_line_skips_absent_fields() {
        let resume = resume_named("Jane");
        assert_eq!(contact_line(&resume), "a@b.c");
    }
}
