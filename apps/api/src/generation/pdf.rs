//! PDF rendering via `lopdf`: Helvetica on letter pages, one text line
//! per layout line, page break when the cursor reaches the bottom margin.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::errors::AppError;
use crate::generation::{contact_line, date_range, section_heading};
use crate::models::resume::Resume;
use crate::models::template::LayoutParams;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const LINE_SPACING: f32 = 1.4;

struct TextLine {
    text: String,
    size: u32,
    bold: bool,
    /// Headings carry the template's primary color.
    colored: bool,
    gap_before: f32,
}

impl TextLine {
    fn body(text: impl Into<String>, size: u32) -> Self {
        TextLine {
            text: text.into(),
            size,
            bold: false,
            colored: false,
            gap_before: 0.0,
        }
    }

    fn heading(text: impl Into<String>, size: u32) -> Self {
        TextLine {
            text: text.into(),
            size,
            bold: true,
            colored: true,
            gap_before: 10.0,
        }
    }
}

/// Renders the resume as a PDF byte buffer.
pub fn render(resume: &Resume, layout: &LayoutParams) -> Result<Vec<u8>, AppError> {
    let lines = layout_lines(resume, layout);
    let color = hex_color(&layout.primary_color);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_font,
            "F2" => bold_font,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in paginate(&lines) {
        let content = page_content(page, color);
        let encoded = content
            .encode()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF content encoding failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0i64.into(), 0i64.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF serialization failed: {e}")))?;
    Ok(out)
}

/// Splits the lines into pages by advancing a y cursor.
fn paginate(lines: &[TextLine]) -> Vec<Vec<(&TextLine, f32)>> {
    let mut pages = Vec::new();
    let mut page: Vec<(&TextLine, f32)> = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let height = line.size as f32 * LINE_SPACING + line.gap_before;
        if y - height < MARGIN && !page.is_empty() {
            pages.push(page);
            page = Vec::new();
            y = PAGE_HEIGHT - MARGIN;
        }
        y -= height;
        page.push((line, y));
    }
    if !page.is_empty() {
        pages.push(page);
    }
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    pages
}

fn page_content(page: Vec<(&TextLine, f32)>, color: (f32, f32, f32)) -> Content {
    let mut operations = Vec::new();
    for (line, y) in page {
        let font = if line.bold { "F2" } else { "F1" };
        let (r, g, b) = if line.colored { color } else { (0.0, 0.0, 0.0) };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        operations.push(Operation::new(
            "Tf",
            vec![font.into(), (line.size as i64).into()],
        ));
        operations.push(Operation::new("Td", vec![MARGIN.into(), y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.text.clone())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn layout_lines(resume: &Resume, layout: &LayoutParams) -> Vec<TextLine> {
    let heading = layout.heading_size;
    let body = layout.body_size;
    let mut lines = Vec::new();

    lines.push(TextLine::heading(
        resume.fields.contact_info.name.clone(),
        heading + 2,
    ));
    let contact = contact_line(resume);
    if !contact.is_empty() {
        lines.push(TextLine::body(contact, body));
    }

    if let Some(summary) = &resume.fields.summary {
        lines.push(TextLine::heading(section_heading(layout, "Summary"), heading));
        lines.extend(wrap_text(summary, body).into_iter().map(|t| TextLine::body(t, body)));
    }

    if !resume.fields.experience.is_empty() {
        lines.push(TextLine::heading(
            section_heading(layout, "Experience"),
            heading,
        ));
        for exp in &resume.fields.experience {
            let mut header = TextLine::body(format!("{} - {}", exp.position, exp.company), body);
            header.bold = true;
            lines.push(header);
            lines.push(TextLine::body(
                date_range(&exp.start_date, exp.end_date.as_deref()),
                body,
            ));
            for desc in &exp.description {
                let text = if layout.use_bullets {
                    format!("- {desc}")
                } else {
                    desc.clone()
                };
                lines.extend(wrap_text(&text, body).into_iter().map(|t| TextLine::body(t, body)));
            }
        }
    }

    if !resume.fields.education.is_empty() {
        lines.push(TextLine::heading(
            section_heading(layout, "Education"),
            heading,
        ));
        for edu in &resume.fields.education {
            let mut text = edu.degree.clone();
            if let Some(field) = &edu.field_of_study {
                text.push_str(&format!(" in {field}"));
            }
            text.push_str(&format!(", {}", edu.institution));
            let mut line = TextLine::body(text, body);
            line.bold = true;
            lines.push(line);
            lines.push(TextLine::body(
                date_range(&edu.start_date, edu.end_date.as_deref()),
                body,
            ));
        }
    }

    if !resume.fields.skills.is_empty() {
        lines.push(TextLine::heading(section_heading(layout, "Skills"), heading));
        let names: Vec<&str> = resume.fields.skills.iter().map(|s| s.name.as_str()).collect();
        lines.extend(
            wrap_text(&names.join(", "), body)
                .into_iter()
                .map(|t| TextLine::body(t, body)),
        );
    }

    if !resume.fields.certifications.is_empty() {
        lines.push(TextLine::heading(
            section_heading(layout, "Certifications"),
            heading,
        ));
        for cert in &resume.fields.certifications {
            lines.push(TextLine::body(
                format!("{} - {} ({})", cert.name, cert.issuer, cert.date),
                body,
            ));
        }
    }

    lines
}

/// Greedy word wrap against the printable width, approximating Helvetica
/// at half the point size per character.
fn wrap_text(text: &str, size: u32) -> Vec<String> {
    let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (size as f32 * 0.5)).max(16.0) as usize;
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// `"2E74B5"` (with or without a leading `#`) to unit RGB; black on
/// malformed input.
fn hex_color(hex: &str) -> (f32, f32, f32) {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return (0.0, 0.0, 0.0);
    }
    let parse = |s: &str| u8::from_str_radix(s, 16).map(|v| f32::from(v) / 255.0);
    match (parse(&hex[0..2]), parse(&hex[2..4]), parse(&hex[4..6])) {
        (Ok(r), Ok(g), Ok(b)) => (r, g, b),
        _ => (0.0, 0.0, 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ContactInfo, Experience, ResumeFields};
    use crate::models::template::LayoutOverrides;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_resume(positions: usize) -> Resume {
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
                summary: Some("Engineer with a decade of systems work.".into()),
                experience: (0..positions)
                    .map(|i| Experience {
                        company: format!("Company {i}"),
                        position: "Engineer".into(),
                        start_date: "2020".into(),
                        end_date: Some("2021".into()),
                        current: false,
                        description: vec!["Did meaningful work on the platform".into(); 4],
                    })
                    .collect(),
                ..Default::default()
            },
            raw_text: String::new(),
            industry: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_pdf_output_starts_with_magic() {
        let bytes = render(&sample_resume(1), &LayoutParams::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_survives_extreme_override_sizes() {
        let layout = LayoutParams::default().merged_with(&LayoutOverrides {
            heading_size: Some(u32::MAX),
            body_size: Some(u32::MAX),
            ..Default::default()
        });
        let bytes = render(&sample_resume(1), &layout).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_resume_spans_multiple_pages() {
        let layout = LayoutParams::default();
        let lines = layout_lines(&sample_resume(20), &layout);
        assert!(paginate(&lines).len() > 1);
    }

    #[test]
    fn test_hex_color_parses_and_defaults() {
        assert_eq!(hex_color("000000"), (0.0, 0.0, 0.0));
        let (r, g, b) = hex_color("#FF0000");
        assert!((r - 1.0).abs() < 1e-6 && g == 0.0 && b == 0.0);
        assert_eq!(hex_color("zzz"), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let wrapped = wrap_text(&"word ".repeat(60), 11);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.len() <= 90));
    }
}
