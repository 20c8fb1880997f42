//! Heuristic structure extraction: section splitting, contact details,
//! and best-effort experience/education/skill/certification records.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::{Certification, ContactInfo, Education, Experience, Skill};

/// Resume section buckets. Content before the first recognized heading
/// lands in `Header`; unmatched trailing content stays with the section
/// whose heading preceded it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Certifications,
    Projects,
}

#[derive(Debug, Default)]
pub struct ParsedSections {
    map: HashMap<Section, String>,
}

impl ParsedSections {
    pub fn section(&self, section: Section) -> &str {
        self.map.get(&section).map(String::as_str).unwrap_or("")
    }
}

/// Maximum length for a line to be considered a section heading.
const MAX_HEADING_LEN: usize = 40;

fn heading_for(line: &str) -> Option<Section> {
    let trimmed = line.trim().trim_end_matches(':').trim().to_lowercase();
    if trimmed.is_empty() || trimmed.len() > MAX_HEADING_LEN {
        return None;
    }
    match trimmed.as_str() {
        "summary" | "profile" | "objective" | "about" | "professional summary" => {
            Some(Section::Summary)
        }
        "experience" | "work experience" | "employment" | "professional experience"
        | "work history" => Some(Section::Experience),
        "education" | "academic" | "academic background" | "qualifications" => {
            Some(Section::Education)
        }
        "skills" | "technical skills" | "competencies" | "core competencies" => {
            Some(Section::Skills)
        }
        "certifications" | "certificates" | "credentials" => Some(Section::Certifications),
        "projects" | "portfolio" => Some(Section::Projects),
        _ => None,
    }
}

/// Splits resume text into sections by heading keywords. Unmatched content
/// falls into the bucket of the most recent heading (or `Header`).
pub fn split_into_sections(text: &str) -> ParsedSections {
    let mut map: HashMap<Section, String> = HashMap::new();
    let mut current = Section::Header;
    let mut buffer: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(section) = heading_for(line) {
            if !buffer.is_empty() {
                map.entry(current)
                    .or_default()
                    .push_str(&(buffer.join("\n") + "\n"));
                buffer.clear();
            }
            current = section;
        } else {
            buffer.push(line);
        }
    }
    if !buffer.is_empty() {
        map.entry(current).or_default().push_str(&buffer.join("\n"));
    }

    ParsedSections { map }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email regex")
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\(\d{3}\)\s?\d{3}[-.\s]?\d{4}|\+?\d{1,3}[-.\s]?\d{3}[-.\s]?\d{3}[-.\s]?\d{2,4})")
        .expect("phone regex")
});
static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[\w-]+").expect("linkedin regex"));
static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]+(?: [A-Z][a-z]+)*), ([A-Z]{2}|[A-Z][a-z]+)").expect("location regex")
});
static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Month alternatives must be named explicitly; a bare [A-Za-z]+ year
    // pattern would swallow the company name preceding the date.
    Regex::new(
        r"(?i)((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4})\s*[-–—]\s*((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\.?\s+\d{4}|\d{4}|Present|Current)",
    )
    .expect("date range regex")
});
static DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Bachelor|Master|PhD|Doctorate|Associate)\s+(?:of|in)\s+\w+|\b(B\.?S\.?|B\.?A\.?|M\.?S\.?|M\.?A\.?|Ph\.?D\.?)\b",
    )
    .expect("degree regex")
});
static GPA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)GPA[:\s]+([\d.]+)").expect("gpa regex"));
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").expect("year regex"));

/// Skills the parser recognizes anywhere in the text.
pub const COMMON_SKILLS: &[&str] = &[
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "Rust",
    "Go",
    "SQL",
    "React",
    "Node.js",
    "Angular",
    "Vue.js",
    "TypeScript",
    "HTML",
    "CSS",
    "AWS",
    "Docker",
    "Kubernetes",
    "Git",
    "Linux",
    "Machine Learning",
    "Data Science",
    "Agile",
    "Scrum",
    "Project Management",
    "TensorFlow",
    "PyTorch",
    "MongoDB",
    "PostgreSQL",
    "Redis",
    "Kafka",
    "REST API",
    "GraphQL",
];

/// Extracts contact details from the head of the resume text.
pub fn extract_contact_info(text: &str) -> ContactInfo {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let mut name = lines.first().map(|l| l.trim().to_string()).unwrap_or_else(|| "Unknown".into());
    // More than four words is probably not just a name; keep the first two.
    if name.split_whitespace().count() > 4 {
        name = name.split_whitespace().take(2).collect::<Vec<_>>().join(" ");
    }

    let head: String = text.chars().take(500).collect();
    ContactInfo {
        name,
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
        location: LOCATION_RE.find(&head).map(|m| m.as_str().to_string()),
        linkedin: LINKEDIN_RE
            .find(text)
            .map(|m| format!("https://{}", m.as_str())),
        website: None,
    }
}

/// Cleans and bounds the summary section.
pub fn extract_summary(summary_text: &str) -> Option<String> {
    let summary = summary_text.split_whitespace().collect::<Vec<_>>().join(" ");
    if summary.is_empty() {
        return None;
    }
    if summary.chars().count() > 500 {
        let truncated: String = summary.chars().take(500).collect();
        Some(format!("{truncated}..."))
    } else {
        Some(summary)
    }
}

/// Builds experience entries by scanning for date-range lines; subsequent
/// lines become that entry's description until the next range appears.
pub fn extract_experience(experience_text: &str) -> Vec<Experience> {
    let mut experiences = Vec::new();
    let mut current: Option<Experience> = None;

    for line in experience_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = DATE_RANGE_RE.captures(line) {
            if let Some(exp) = current.take() {
                experiences.push(exp);
            }
            let start_date = caps[1].to_string();
            let end_raw = caps[2].to_string();
            let is_current = end_raw.eq_ignore_ascii_case("present")
                || end_raw.eq_ignore_ascii_case("current");
            let end_date = if is_current { None } else { Some(end_raw) };

            let before_dates = line[..caps.get(0).map(|m| m.start()).unwrap_or(0)].trim();
            let (position, company) = split_position_company(before_dates);

            current = Some(Experience {
                company,
                position,
                start_date,
                end_date,
                current: is_current,
                description: Vec::new(),
            });
        } else if let Some(exp) = current.as_mut() {
            // Skip stray page numbers and the like.
            if !line.chars().next().is_some_and(|c| c.is_ascii_digit()) {
                exp.description
                    .push(line.trim_start_matches(['•', '-', '*', ' ']).to_string());
            }
        }
    }
    if let Some(exp) = current.take() {
        experiences.push(exp);
    }
    experiences
}

fn split_position_company(header: &str) -> (String, String) {
    let header = header.trim_end_matches([',', '|']).trim();
    if let Some((position, company)) = split_once_ignore_case(header, " at ") {
        (position.trim().to_string(), company.trim().to_string())
    } else if let Some((position, company)) = header.split_once(" - ") {
        (position.trim().to_string(), company.trim().to_string())
    } else if header.is_empty() {
        ("Unknown".to_string(), "Unknown".to_string())
    } else {
        (header.to_string(), "Unknown".to_string())
    }
}

fn split_once_ignore_case<'a>(haystack: &'a str, needle: &str) -> Option<(&'a str, &'a str)> {
    let lower = haystack.to_lowercase();
    let idx = lower.find(&needle.to_lowercase())?;
    Some((&haystack[..idx], &haystack[idx + needle.len()..]))
}

/// Builds education entries from degree-pattern and institution lines.
pub fn extract_education(education_text: &str) -> Vec<Education> {
    let mut educations = Vec::new();
    let mut current: Option<Education> = None;

    for line in education_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let degree_match = DEGREE_RE.find(line);
        let has_institution = line.contains("University") || line.contains("College");

        if degree_match.is_some() || has_institution {
            if let Some(edu) = current.take() {
                educations.push(edu);
            }

            let (institution, degree) = if has_institution {
                let mut parts = line.splitn(2, ',');
                let institution = parts.next().unwrap_or(line).trim().to_string();
                let degree = parts
                    .next()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .or_else(|| degree_match.map(|m| m.as_str().to_string()))
                    .unwrap_or_else(|| "Degree".to_string());
                (institution, degree)
            } else {
                (
                    line.to_string(),
                    degree_match
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_else(|| "Degree".to_string()),
                )
            };

            let (start_date, end_date) = match DATE_RANGE_RE.captures(line) {
                Some(caps) => {
                    let end = caps[2].to_string();
                    let end = if end.eq_ignore_ascii_case("present") {
                        None
                    } else {
                        Some(end)
                    };
                    (caps[1].to_string(), end)
                }
                None => ("Unknown".to_string(), None),
            };

            current = Some(Education {
                institution,
                degree,
                field_of_study: None,
                start_date,
                end_date,
                gpa: None,
            });
        } else if let Some(edu) = current.as_mut() {
            if let Some(caps) = GPA_RE.captures(line) {
                edu.gpa = Some(caps[1].to_string());
            }
        }
    }
    if let Some(edu) = current.take() {
        educations.push(edu);
    }
    educations
}

/// Collects known skills appearing anywhere, then adds items from
/// comma-separated list lines in the skills section.
pub fn extract_skills(skills_text: &str) -> Vec<Skill> {
    let lower = skills_text.to_lowercase();
    let mut skills: Vec<Skill> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for name in COMMON_SKILLS {
        if lower.contains(&name.to_lowercase()) {
            seen.push(name.to_lowercase());
            skills.push(Skill::named(*name));
        }
    }

    for line in skills_text.lines() {
        let items: Vec<&str> = line.split(',').map(str::trim).collect();
        if items.len() > 2 {
            for item in items {
                if item.is_empty() || item.len() > 40 {
                    continue;
                }
                let key = item.to_lowercase();
                if !seen.contains(&key) {
                    seen.push(key);
                    skills.push(Skill::named(item));
                }
            }
        }
    }
    skills
}

/// Collects certification lines mentioning Certified/Certificate/License.
pub fn extract_certifications(cert_text: &str) -> Vec<Certification> {
    let mut certifications = Vec::new();
    for line in cert_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains("Certified") || line.contains("Certificate") || line.contains("License") {
            let (name, issuer) = match line.split_once(" - ") {
                Some((name, issuer)) => (name.trim().to_string(), issuer.trim().to_string()),
                None => (line.to_string(), "Unknown".to_string()),
            };
            let date = YEAR_RE
                .captures(line)
                .map(|c| c[1].to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            certifications.push(Certification { name, issuer, date });
        }
    }
    certifications
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane.doe@example.com | (555) 123-4567 | Portland, OR\nlinkedin.com/in/janedoe\n\nSummary\nSenior engineer with 8 years building distributed systems.\n\nExperience\nSenior Engineer at Acme Corp 2019 - Present\nLed migration to Kubernetes, cutting deploy time by 60%\nManaged a team of 5 engineers\nEngineer - Initech 2015 - 2019\nBuilt REST API services in Python\n\nEducation\nState University, B.S. Computer Science 2011 - 2015\nGPA: 3.8\n\nSkills\nPython, Rust, Kubernetes, PostgreSQL, Terraform\n\nCertifications\nAWS Certified Solutions Architect - Amazon 2021";

    #[test]
    fn test_split_into_sections_buckets_content() {
        let parsed = split_into_sections(SAMPLE);
        assert!(parsed.section(Section::Header).contains("Jane Doe"));
        assert!(parsed.section(Section::Summary).contains("8 years"));
        assert!(parsed.section(Section::Experience).contains("Acme Corp"));
        assert!(parsed.section(Section::Education).contains("State University"));
        assert!(parsed.section(Section::Skills).contains("Terraform"));
        assert!(parsed
            .section(Section::Certifications)
            .contains("Solutions Architect"));
    }

    #[test]
    fn test_unmatched_content_stays_in_header_bucket() {
        let parsed = split_into_sections("Just a line\nAnother line");
        assert!(parsed.section(Section::Header).contains("Another line"));
        assert_eq!(parsed.section(Section::Experience), "");
    }

    #[test]
    fn test_extract_contact_info() {
        let contact = extract_contact_info(SAMPLE);
        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.email.as_deref(), Some("jane.doe@example.com"));
        assert!(contact.phone.is_some());
        assert_eq!(
            contact.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(contact.location.as_deref(), Some("Portland, OR"));
    }

    #[test]
    fn test_contact_name_falls_back_on_long_first_line() {
        let contact =
            extract_contact_info("Jane Doe is a senior engineer in Portland\njane@example.com");
        assert_eq!(contact.name, "Jane Doe");
    }

    #[test]
    fn test_extract_experience_entries_and_descriptions() {
        let parsed = split_into_sections(SAMPLE);
        let experience = extract_experience(parsed.section(Section::Experience));
        assert_eq!(experience.len(), 2);

        assert_eq!(experience[0].position, "Senior Engineer");
        assert_eq!(experience[0].company, "Acme Corp");
        assert_eq!(experience[0].start_date, "2019");
        assert!(experience[0].current);
        assert!(experience[0].end_date.is_none());
        assert_eq!(experience[0].description.len(), 2);

        assert_eq!(experience[1].position, "Engineer");
        assert_eq!(experience[1].company, "Initech");
        assert_eq!(experience[1].end_date.as_deref(), Some("2019"));
        assert!(!experience[1].current);
    }

    #[test]
    fn test_extract_education_with_gpa() {
        let parsed = split_into_sections(SAMPLE);
        let education = extract_education(parsed.section(Section::Education));
        assert_eq!(education.len(), 1);
        assert_eq!(education[0].institution, "State University");
        assert!(education[0].degree.contains("B.S."));
        assert_eq!(education[0].start_date, "2011");
        assert_eq!(education[0].gpa.as_deref(), Some("3.8"));
    }

    #[test]
    fn test_extract_skills_known_and_listed() {
        let skills = extract_skills("Python, Rust, Kubernetes, PostgreSQL, Terraform");
        let names: Vec<&str> = skills.iter().map(|s| s.name.as_str()).collect();
        assert!(names.contains(&"Python"));
        assert!(names.contains(&"Kubernetes"));
        // Terraform is not in the known list but appears in a comma list.
        assert!(names.contains(&"Terraform"));
        // No duplicates between the known list and comma parsing.
        let python_count = names.iter().filter(|n| n.eq_ignore_ascii_case("python")).count();
        assert_eq!(python_count, 1);
    }

    #[test]
    fn test_extract_certifications() {
        let certs =
            extract_certifications("AWS Certified Solutions Architect - Amazon 2021\nnot one");
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].issuer, "Amazon 2021");
        assert_eq!(certs[0].date, "2021");
    }

    #[test]
    fn test_empty_sections_yield_empty_collections() {
        assert!(extract_experience("").is_empty());
        assert!(extract_education("").is_empty());
        assert!(extract_certifications("").is_empty());
        assert!(extract_summary("").is_none());
    }
}
