//! DOCX rendering via `docx-rs`.

use std::io::Cursor;

use docx_rs::{AlignmentType, Docx, Paragraph, Run};

use crate::errors::AppError;
use crate::generation::{contact_line, date_range, section_heading};
use crate::models::resume::Resume;
use crate::models::template::{HeaderAlignment, LayoutParams};

/// Renders the resume as a DOCX byte buffer.
pub fn render(resume: &Resume, layout: &LayoutParams) -> Result<Vec<u8>, AppError> {
    let mut doc = Docx::new();
    let align = match layout.header_alignment {
        HeaderAlignment::Center => AlignmentType::Center,
        HeaderAlignment::Left => AlignmentType::Left,
    };
    // docx sizes are half-points.
    let heading = (layout.heading_size * 2) as usize;
    let body = (layout.body_size * 2) as usize;

    doc = doc.add_paragraph(
        Paragraph::new()
            .add_run(
                Run::new()
                    .add_text(resume.fields.contact_info.name.clone())
                    .size(heading)
                    .bold()
                    .color(layout.primary_color.clone()),
            )
            .align(align),
    );

    let contact = contact_line(resume);
    if !contact.is_empty() {
        doc = doc.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text(contact).size(body))
                .align(align),
        );
    }

    if let Some(summary) = &resume.fields.summary {
        doc = add_section_heading(doc, layout, heading, "Summary");
        doc = doc.add_paragraph(body_paragraph(summary, body));
    }

    if !resume.fields.experience.is_empty() {
        doc = add_section_heading(doc, layout, heading, "Experience");
        for exp in &resume.fields.experience {
            doc = doc.add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(exp.position.clone()).size(body).bold())
                    .add_run(Run::new().add_text(format!(" - {}", exp.company)).size(body)),
            );
            doc = doc.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(date_range(&exp.start_date, exp.end_date.as_deref()))
                        .size(body)
                        .italic(),
                ),
            );
            for desc in &exp.description {
                let text = if layout.use_bullets {
                    format!("• {desc}")
                } else {
                    desc.clone()
                };
                doc = doc.add_paragraph(body_paragraph(&text, body));
            }
        }
    }

    if !resume.fields.education.is_empty() {
        doc = add_section_heading(doc, layout, heading, "Education");
        for edu in &resume.fields.education {
            let mut line = Paragraph::new()
                .add_run(Run::new().add_text(edu.degree.clone()).size(body).bold());
            if let Some(field) = &edu.field_of_study {
                line = line.add_run(Run::new().add_text(format!(" in {field}")).size(body));
            }
            line = line.add_run(Run::new().add_text(format!(", {}", edu.institution)).size(body));
            doc = doc.add_paragraph(line);
            doc = doc.add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(date_range(&edu.start_date, edu.end_date.as_deref()))
                        .size(body)
                        .italic(),
                ),
            );
        }
    }

    if !resume.fields.skills.is_empty() {
        doc = add_section_heading(doc, layout, heading, "Skills");
        let names: Vec<&str> = resume.fields.skills.iter().map(|s| s.name.as_str()).collect();
        doc = doc.add_paragraph(body_paragraph(&names.join(", "), body));
    }

    if !resume.fields.certifications.is_empty() {
        doc = add_section_heading(doc, layout, heading, "Certifications");
        for cert in &resume.fields.certifications {
            let line = format!("{} - {} ({})", cert.name, cert.issuer, cert.date);
            doc = doc.add_paragraph(body_paragraph(&line, body));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut cursor)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("DOCX packing failed: {e}")))?;
    Ok(cursor.into_inner())
}

fn add_section_heading(doc: Docx, layout: &LayoutParams, heading_size: usize, title: &str) -> Docx {
    doc.add_paragraph(Paragraph::new()).add_paragraph(
        Paragraph::new().add_run(
            Run::new()
                .add_text(section_heading(layout, title))
                .size(heading_size)
                .bold()
                .color(layout.primary_color.clone()),
        ),
    )
}

fn body_paragraph(text: &str, body_size: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text.to_string()).size(body_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, Experience, ResumeFields, Skill};
    use crate::models::template::LayoutOverrides;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_resume() -> Resume {
        Resume {
            id: Uuid::new_v4(),
            filename: "in.pdf".into(),
            uploaded_at: Utc::now(),
            fields: ResumeFields {
                contact_info: ContactInfo {
                    name: "Jane Doe".into(),
                    email: Some("jane@example.com".into()),
                    ..Default::default()
                },
                summary: Some("Engineer.".into()),
                experience: vec![Experience {
                    company: "Acme".into(),
                    position: "Engineer".into(),
                    start_date: "2020".into(),
                    end_date: None,
                    current: true,
                    description: vec!["Built things".into()],
                }],
                skills: vec![Skill::named("Rust")],
                ..Default::default()
            },
            raw_text: String::new(),
            industry: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_docx_output_is_nonempty_zip() {
        let bytes = render(&sample_resume(), &LayoutParams::default()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_render_survives_extreme_override_sizes() {
        let layout = LayoutParams::default().merged_with(&LayoutOverrides {
            heading_size: Some(u32::MAX),
            body_size: Some(u32::MAX),
            ..Default::default()
        });
        let bytes = render(&sample_resume(), &layout).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
