//! Resume analysis: heuristic scoring plus an LLM layer with salvage
//! parsing, ATS optimization, skills gap analysis, and format cleanup.

pub mod analyzer;
pub mod ats;
pub mod format;
pub mod handlers;
pub mod llm;
pub mod skills;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Quantitative facts about a resume, computed heuristically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub total_experience_years: i64,
    pub number_of_positions: usize,
    pub number_of_skills: usize,
    pub number_of_certifications: usize,
    pub has_summary: bool,
    pub quantifiable_achievements: usize,
    pub text_length: usize,
    pub average_description_length: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub important_keywords: HashMap<String, usize>,
    pub skill_keywords: HashMap<String, usize>,
    pub total_unique_keywords: usize,
}

/// Complete analysis of a resume. Every field is always present; the
/// LLM layer fills gaps from the heuristic pass rather than omitting keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    /// ATS compatibility score, always clamped to [0, 100].
    pub ats_score: u8,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub metrics: Metrics,
    pub keyword_analysis: KeywordAnalysis,
}

/// Clamps an LLM- or heuristic-supplied score into the valid range.
pub fn clamp_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-12.0), 0);
        assert_eq!(clamp_score(0.0), 0);
        assert_eq!(clamp_score(71.6), 72);
        assert_eq!(clamp_score(100.0), 100);
        assert_eq!(clamp_score(412.0), 100);
        assert_eq!(clamp_score(f64::NAN), 0);
    }
}
