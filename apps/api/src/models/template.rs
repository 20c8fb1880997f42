use serde::{Deserialize, Serialize};

/// Where section and header text sits on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlignment {
    #[default]
    Left,
    Center,
}

/// Layout knobs a template exposes. `generate-custom` merges caller
/// overrides over these field by field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutParams {
    pub heading_size: u32,
    pub body_size: u32,
    /// Hex RGB, e.g. "2E74B5".
    pub primary_color: String,
    pub header_alignment: HeaderAlignment,
    pub section_headers_uppercase: bool,
    pub use_bullets: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            heading_size: 16,
            body_size: 11,
            primary_color: "000000".to_string(),
            header_alignment: HeaderAlignment::Left,
            section_headers_uppercase: true,
            use_bullets: true,
        }
    }
}

/// Caller-supplied partial layout for `generate-custom`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutOverrides {
    pub heading_size: Option<u32>,
    pub body_size: Option<u32>,
    pub primary_color: Option<String>,
    pub header_alignment: Option<HeaderAlignment>,
    pub section_headers_uppercase: Option<bool>,
    pub use_bullets: Option<bool>,
}

/// Printable font size bounds. Caller-supplied overrides outside this
/// range are clamped so downstream size arithmetic stays in range.
const MIN_FONT_SIZE: u32 = 6;
const MAX_FONT_SIZE: u32 = 72;

impl LayoutParams {
    pub fn merged_with(&self, overrides: &LayoutOverrides) -> LayoutParams {
        LayoutParams {
            heading_size: overrides
                .heading_size
                .unwrap_or(self.heading_size)
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            body_size: overrides
                .body_size
                .unwrap_or(self.body_size)
                .clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            primary_color: overrides
                .primary_color
                .clone()
                .unwrap_or_else(|| self.primary_color.clone()),
            header_alignment: overrides.header_alignment.unwrap_or(self.header_alignment),
            section_headers_uppercase: overrides
                .section_headers_uppercase
                .unwrap_or(self.section_headers_uppercase),
            use_bullets: overrides.use_bullets.unwrap_or(self.use_bullets),
        }
    }
}

/// A read-only catalog entry, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub industry: String,
    pub ats_friendly: bool,
    pub layout: LayoutParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_base_when_no_overrides() {
        let base = LayoutParams::default();
        let merged = base.merged_with(&LayoutOverrides::default());
        assert_eq!(merged.heading_size, base.heading_size);
        assert_eq!(merged.primary_color, base.primary_color);
        assert_eq!(merged.use_bullets, base.use_bullets);
    }

    #[test]
    fn test_merge_applies_partial_overrides() {
        let base = LayoutParams::default();
        let overrides = LayoutOverrides {
            heading_size: Some(20),
            primary_color: Some("1A73E8".into()),
            use_bullets: Some(false),
            ..Default::default()
        };
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.heading_size, 20);
        assert_eq!(merged.primary_color, "1A73E8");
        assert!(!merged.use_bullets);
        assert_eq!(merged.body_size, base.body_size);
    }

    #[test]
    fn test_merge_clamps_extreme_sizes() {
        let base = LayoutParams::default();
        let overrides = LayoutOverrides {
            heading_size: Some(u32::MAX),
            body_size: Some(0),
            ..Default::default()
        };
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.heading_size, MAX_FONT_SIZE);
        assert_eq!(merged.body_size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_header_alignment_deserializes_lowercase() {
        let align: HeaderAlignment = serde_json::from_str(r#""center""#).unwrap();
        assert_eq!(align, HeaderAlignment::Center);
    }
}
