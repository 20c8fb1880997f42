//! Read-only template catalog, built once at startup.

pub mod handlers;

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::template::{HeaderAlignment, LayoutParams, Template};

pub struct TemplateCatalog {
    templates: HashMap<String, Template>,
    /// Catalog order for listing.
    order: Vec<String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        let templates = builtin_templates();
        let order = templates.iter().map(|t| t.id.clone()).collect();
        Self {
            templates: templates.into_iter().map(|t| (t.id.clone(), t)).collect(),
            order,
        }
    }

    pub fn get(&self, id: &str) -> Result<&Template, AppError> {
        self.templates
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("Template '{id}' not found")))
    }

    pub fn list(&self) -> Vec<&Template> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id))
            .collect()
    }

    pub fn list_for_industry(&self, industry: &str) -> Vec<&Template> {
        let wanted = industry.to_lowercase();
        self.list()
            .into_iter()
            .filter(|t| t.industry.to_lowercase() == wanted)
            .collect()
    }

    /// Distinct industry tags in catalog order.
    pub fn industries(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for template in self.list() {
            if !seen.contains(&template.industry) {
                seen.push(template.industry.clone());
            }
        }
        seen
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    industry: &str,
    ats_friendly: bool,
    layout: LayoutParams,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        industry: industry.to_string(),
        ats_friendly,
        layout,
    }
}

fn builtin_templates() -> Vec<Template> {
    vec![
        template(
            "modern",
            "Modern",
            "Clean contemporary layout with a centered header and accent color",
            "general",
            true,
            LayoutParams {
                heading_size: 18,
                body_size: 11,
                primary_color: "2E74B5".into(),
                header_alignment: HeaderAlignment::Center,
                section_headers_uppercase: true,
                use_bullets: true,
            },
        ),
        template(
            "classic",
            "Classic",
            "Traditional single-column layout, black on white",
            "general",
            true,
            LayoutParams {
                heading_size: 16,
                body_size: 11,
                primary_color: "000000".into(),
                header_alignment: HeaderAlignment::Left,
                section_headers_uppercase: false,
                use_bullets: true,
            },
        ),
        template(
            "minimal",
            "Minimal",
            "Sparse layout with small headings and no bullet glyphs",
            "design",
            true,
            LayoutParams {
                heading_size: 14,
                body_size: 10,
                primary_color: "333333".into(),
                header_alignment: HeaderAlignment::Left,
                section_headers_uppercase: false,
                use_bullets: false,
            },
        ),
        template(
            "technical",
            "Technical",
            "Dense layout that keeps skills and experience prominent",
            "technology",
            true,
            LayoutParams {
                heading_size: 15,
                body_size: 10,
                primary_color: "1A1A2E".into(),
                header_alignment: HeaderAlignment::Left,
                section_headers_uppercase: true,
                use_bullets: true,
            },
        ),
        template(
            "executive",
            "Executive",
            "Formal layout with larger headings for senior roles",
            "management",
            true,
            LayoutParams {
                heading_size: 20,
                body_size: 12,
                primary_color: "1F3864".into(),
                header_alignment: HeaderAlignment::Center,
                section_headers_uppercase: true,
                use_bullets: true,
            },
        ),
        template(
            "creative",
            "Creative",
            "Accent-heavy layout for portfolio-driven applications",
            "design",
            false,
            LayoutParams {
                heading_size: 19,
                body_size: 11,
                primary_color: "C0392B".into(),
                header_alignment: HeaderAlignment::Center,
                section_headers_uppercase: false,
                use_bullets: false,
            },
        ),
    ]
}
