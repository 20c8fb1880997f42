//! Upload/parse pipeline: binary file in, structured `Resume` out.

pub mod extract;
pub mod handlers;
pub mod sections;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeFields};

/// Validates an uploaded file and parses it into a `Resume` with a fresh
/// identifier. No side effects; the caller stores the result.
pub fn parse_upload(
    bytes: &[u8],
    filename: &str,
    max_upload_bytes: usize,
) -> Result<Resume, AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation("Filename is required".to_string()));
    }
    let kind = extract::FileKind::from_filename(filename).ok_or_else(|| {
        AppError::Validation("Unsupported file format. Please upload PDF or DOCX.".to_string())
    })?;
    if bytes.len() > max_upload_bytes {
        return Err(AppError::Validation(format!(
            "File exceeds the maximum upload size of {max_upload_bytes} bytes"
        )));
    }
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let text = extract::extract_text(bytes, kind)?;
    let parsed = sections::split_into_sections(&text);

    let fields = ResumeFields {
        contact_info: sections::extract_contact_info(&text),
        summary: sections::extract_summary(parsed.section(sections::Section::Summary)),
        experience: sections::extract_experience(parsed.section(sections::Section::Experience)),
        education: sections::extract_education(parsed.section(sections::Section::Education)),
        skills: sections::extract_skills(&format!(
            "{}\n{}",
            parsed.section(sections::Section::Skills),
            text
        )),
        certifications: sections::extract_certifications(
            parsed.section(sections::Section::Certifications),
        ),
    };

    Ok(Resume {
        id: Uuid::new_v4(),
        filename: filename.to_string(),
        uploaded_at: Utc::now(),
        fields,
        raw_text: text,
        industry: None,
        tags: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn paragraph(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    #[test]
    fn test_docx_upload_within_limit_parses_to_resume() {
        let mut cursor = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(paragraph("Jane Doe"))
            .add_paragraph(paragraph("jane.doe@example.com | (555) 123-4567"))
            .add_paragraph(paragraph("Summary"))
            .add_paragraph(paragraph("Engineer with eight years of systems work."))
            .add_paragraph(paragraph("Skills"))
            .add_paragraph(paragraph("Python, Rust, Kubernetes, SQL"))
            .build()
            .pack(&mut cursor)
            .unwrap();
        let bytes = cursor.into_inner();

        let resume = parse_upload(&bytes, "resume.docx", 10 * 1024 * 1024).unwrap();
        assert!(!resume.id.is_nil());
        assert_eq!(resume.filename, "resume.docx");
        assert_eq!(resume.fields.contact_info.name, "Jane Doe");
        assert_eq!(
            resume.fields.contact_info.email.as_deref(),
            Some("jane.doe@example.com")
        );
        assert!(resume.fields.summary.is_some());
        assert!(!resume.fields.skills.is_empty());
        assert!(!resume.raw_text.is_empty());
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let err = parse_upload(b"hello", "resume.txt", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let bytes = vec![0u8; 2048];
        let err = parse_upload(&bytes, "resume.pdf", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_missing_filename() {
        let err = parse_upload(b"hello", "  ", 1024).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
