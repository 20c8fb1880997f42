//! Resume-to-job matching: embedding similarity blended with the
//! heuristic skills match, plus LLM gap commentary.

pub mod embeddings;
pub mod handlers;

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::warn;

use crate::analysis::ats::{self, AtsReport};
use crate::analysis::skills::{self, SkillsGap};
use crate::errors::AppError;
use crate::llm_client::{prompts, LlmClient};
use crate::matching::embeddings::TextEmbedder;
use crate::models::resume::Resume;
use crate::store::ResumeStore;

/// Weights from the keyword-era score blend; the embedding similarity
/// now occupies the keyword slot.
const SKILLS_WEIGHT: f64 = 0.6;
const SIMILARITY_WEIGHT: f64 = 0.4;

/// Upper bound on cached job-description embeddings.
const JD_CACHE_CAP: usize = 256;

#[derive(Debug, Serialize)]
pub struct MatchResult {
    /// Blend of the skills match and the semantic similarity, 0-100.
    pub overall_match_score: u8,
    /// Cosine similarity of the embeddings scaled to 0-100.
    pub similarity_score: u8,
    pub skills_analysis: SkillsGap,
    pub ats_analysis: AtsReport,
    /// LLM commentary; absent when no usable commentary came back.
    pub gap_commentary: Option<String>,
    pub recommendations: Vec<String>,
}

/// Matcher with a job-description embedding cache keyed by text hash.
/// Resume embeddings are cached in the store, keyed by identifier, so
/// identical inputs always produce identical scores.
pub struct JobMatcher {
    embedder: Arc<dyn TextEmbedder>,
    jd_cache: RwLock<HashMap<u64, Vec<f32>>>,
}

impl JobMatcher {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self {
            embedder,
            jd_cache: RwLock::new(HashMap::new()),
        }
    }

    pub async fn match_resume(
        &self,
        store: &ResumeStore,
        llm: &LlmClient,
        resume: &Resume,
        job_description: &str,
    ) -> Result<MatchResult, AppError> {
        let resume_embedding = self.resume_embedding(store, resume).await?;
        let jd_embedding = self.job_embedding(job_description).await?;

        let similarity = cosine_similarity(&resume_embedding, &jd_embedding);
        let similarity_score = scale_similarity(similarity);

        let skills_analysis = skills::analyze_gaps(resume, job_description);
        let ats_analysis = ats::optimize(resume, Some(job_description));

        let overall = skills_analysis.match_percentage * SKILLS_WEIGHT
            + f64::from(similarity_score) * SIMILARITY_WEIGHT;
        let overall_match_score = overall.round().clamp(0.0, 100.0) as u8;

        let gap_commentary =
            gap_commentary(llm, resume, job_description, &skills_analysis).await;
        let recommendations = recommendations(&skills_analysis, &ats_analysis);

        Ok(MatchResult {
            overall_match_score,
            similarity_score,
            skills_analysis,
            ats_analysis,
            gap_commentary,
            recommendations,
        })
    }

    async fn resume_embedding(
        &self,
        store: &ResumeStore,
        resume: &Resume,
    ) -> Result<Vec<f32>, AppError> {
        if let Some(cached) = store.cached_embedding(resume.id)? {
            return Ok(cached);
        }
        let embedding = self.embedder.embed(&resume.raw_text).await?;
        store.cache_embedding(resume.id, embedding.clone())?;
        Ok(embedding)
    }

    async fn job_embedding(&self, job_description: &str) -> Result<Vec<f32>, AppError> {
        let key = text_hash(job_description);
        {
            let cache = self.jd_cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = cache.get(&key) {
                return Ok(cached.clone());
            }
        }
        let embedding = self.embedder.embed(job_description).await?;
        let mut cache = self.jd_cache.write().unwrap_or_else(|e| e.into_inner());
        // Reset wholesale at the cap; entries are cheap to recompute.
        if cache.len() >= JD_CACHE_CAP {
            cache.clear();
        }
        cache.insert(key, embedding.clone());
        Ok(embedding)
    }
}

fn text_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Cosine similarity; 0 when either vector has zero norm or the lengths
/// differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Maps cosine similarity to 0-100; negative similarity floors at 0.
fn scale_similarity(similarity: f64) -> u8 {
    (similarity * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Asks the LLM for gap commentary. A failed call or an unusable
/// response yields `None`; the heuristic recommendations still stand.
async fn gap_commentary(
    llm: &LlmClient,
    resume: &Resume,
    job_description: &str,
    skills: &SkillsGap,
) -> Option<String> {
    let prompt = prompts::GAP_COMMENTARY_PROMPT_TEMPLATE
        .replace("{resume_text}", &resume.raw_text)
        .replace("{job_description}", job_description)
        .replace("{matching_skills}", &skills.matching_skills.join(", "))
        .replace("{missing_skills}", &skills.missing_skills.join(", "));

    match llm.call(&prompt, prompts::GAP_COMMENTARY_SYSTEM).await {
        Ok(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(e) => {
            warn!("Gap commentary unavailable: {e}");
            None
        }
    }
}

fn recommendations(skills: &SkillsGap, ats: &AtsReport) -> Vec<String> {
    let mut recommendations = Vec::new();

    if skills.match_percentage < 70.0 {
        recommendations
            .push("Add more skills from the job description to improve your match".to_string());
    }
    if !skills.missing_skills.is_empty() {
        let top: Vec<&str> = skills
            .missing_skills
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();
        recommendations.push(format!("Prioritize adding these skills: {}", top.join(", ")));
    }
    recommendations.extend(ats.suggestions.iter().take(2).cloned());

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ResumeFields, Skill};
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    /// Deterministic embedder: vector derived from byte sums, plus a
    /// call counter to observe caching.
    struct StubEmbedder {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl StubEmbedder {
        fn new() -> Self {
            Self {
                calls: std::sync::atomic::AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextEmbedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            let sum: u32 = text.bytes().map(u32::from).sum();
            Ok(vec![1.0, (sum % 97) as f32 / 97.0, text.len() as f32 / 100.0])
        }
    }

    fn resume(raw_text: &str, skills: &[&str]) -> Resume {
        let mut fields = ResumeFields::default();
        fields.skills = skills.iter().map(|s| Skill::named(*s)).collect();
        Resume {
            id: Uuid::new_v4(),
            filename: "r.pdf".into(),
            uploaded_at: Utc::now(),
            fields,
            raw_text: raw_text.into(),
            industry: None,
            tags: vec![],
        }
    }

    #[test]
    fn test_cosine_similarity_identity_and_orthogonal() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_scale_similarity_floors_negative() {
        assert_eq!(scale_similarity(-0.4), 0);
        assert_eq!(scale_similarity(0.5), 50);
        assert_eq!(scale_similarity(1.0), 100);
    }

    #[tokio::test]
    async fn test_embeddings_cached_per_resume_and_job() {
        let embedder = Arc::new(StubEmbedder::new());
        let matcher = JobMatcher::new(embedder.clone());
        let store = ResumeStore::new();
        let r = resume("python engineer with docker", &["Python"]);
        store.insert(r.clone());

        let first = matcher
            .resume_embedding(&store, &r)
            .await
            .unwrap();
        let second = matcher.resume_embedding(&store, &r).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(embedder.call_count(), 1);

        let jd1 = matcher.job_embedding("needs python").await.unwrap();
        let jd2 = matcher.job_embedding("needs python").await.unwrap();
        assert_eq!(jd1, jd2);
        assert_eq!(embedder.call_count(), 2);
    }

    #[tokio::test]
    async fn test_jd_cache_stays_bounded() {
        let matcher = JobMatcher::new(Arc::new(StubEmbedder::new()));
        for i in 0..(JD_CACHE_CAP + 10) {
            matcher
                .job_embedding(&format!("job description {i}"))
                .await
                .unwrap();
        }
        let len = matcher
            .jd_cache
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len();
        assert!(len <= JD_CACHE_CAP);
        assert!(len > 0);
    }

    #[test]
    fn test_recommendations_cover_missing_skills() {
        let skills = SkillsGap {
            matching_skills: vec![],
            missing_skills: vec!["docker".into(), "kubernetes".into()],
            extra_skills: vec![],
            match_percentage: 0.0,
            suggestions: vec![],
        };
        let ats = AtsReport {
            suggestions: vec!["first".into(), "second".into(), "third".into()],
            match_score: None,
            ats_friendly: false,
        };
        let recs = recommendations(&skills, &ats);
        assert!(recs.iter().any(|r| r.contains("docker, kubernetes")));
        assert!(recs.contains(&"first".to_string()));
        assert!(!recs.contains(&"third".to_string()));
    }
}
