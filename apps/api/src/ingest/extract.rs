//! Plain-text extraction from PDF and DOCX payloads.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::errors::AppError;

/// Supported upload formats, detected from the declared filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
}

impl FileKind {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            Some(FileKind::Pdf)
        } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
            Some(FileKind::Docx)
        } else {
            None
        }
    }
}

/// Extracts cleaned plain text, one line per page line or paragraph.
pub fn extract_text(bytes: &[u8], kind: FileKind) -> Result<String, AppError> {
    let raw = match kind {
        FileKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Validation(format!("Failed to extract text from PDF: {e}")))?,
        FileKind::Docx => extract_docx_text(bytes)?,
    };
    Ok(clean_text(&raw))
}

/// Walks DOCX paragraphs and joins their run text with newlines.
fn extract_docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::Validation(format!("Failed to extract text from DOCX: {e}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            let mut line = String::new();
            for pc in &paragraph.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(text) = rc {
                            line.push_str(&text.text);
                        }
                    }
                }
            }
            lines.push(line);
        }
    }
    Ok(lines.join("\n"))
}

/// Normalizes extracted text: collapses runs of spaces and tabs, trims line
/// ends, and drops control characters while keeping line structure intact.
pub fn clean_text(text: &str) -> String {
    let mut out = Vec::new();
    for line in text.lines() {
        let collapsed = line
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        let filtered: String = collapsed
            .chars()
            .filter(|c| !c.is_control())
            .collect();
        out.push(filtered);
    }
    // Collapse runs of blank lines to one.
    let mut result = Vec::new();
    let mut last_blank = false;
    for line in out {
        let blank = line.is_empty();
        if !(blank && last_blank) {
            result.push(line);
        }
        last_blank = blank;
    }
    result.join("\n").trim().to_string()
}
