use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact details pulled from the top of a resume.
/// Fields the parser could not find stay `None` rather than being dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: Option<String>,
    pub proficiency: Option<String>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Skill {
            name: name.into(),
            category: None,
            proficiency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// The structured fields of a resume that versioning snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeFields {
    pub contact_info: ContactInfo,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

/// A parsed resume, created on upload and mutated by improve-format and
/// metadata updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: ResumeFields,
    pub raw_text: String,
    pub industry: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An immutable snapshot of a resume's structured fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeVersion {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub changes: Option<String>,
    pub fields: ResumeFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_serializes_with_flattened_fields() {
        let resume = Resume {
            id: Uuid::new_v4(),
            filename: "resume.pdf".into(),
            uploaded_at: Utc::now(),
            fields: ResumeFields {
                contact_info: ContactInfo {
                    name: "Ada Lovelace".into(),
                    email: Some("ada@example.com".into()),
                    ..Default::default()
                },
                summary: Some("Analytical engine programmer".into()),
                ..Default::default()
            },
            raw_text: "Ada Lovelace\nada@example.com".into(),
            industry: None,
            tags: vec![],
        };

        let json = serde_json::to_value(&resume).unwrap();
        assert_eq!(json["contact_info"]["name"], "Ada Lovelace");
        assert_eq!(json["summary"], "Analytical engine programmer");
        // Optional parser misses are explicit nulls, never absent keys.
        assert!(json["contact_info"]
            .as_object()
            .unwrap()
            .contains_key("phone"));
    }

    #[test]
    fn test_experience_defaults_apply() {
        let json = serde_json::json!({
            "company": "Acme",
            "position": "Engineer",
            "start_date": "2020",
            "end_date": null
        });
        let exp: Experience = serde_json::from_value(json).unwrap();
        assert!(!exp.current);
        assert!(exp.description.is_empty());
    }
}
