use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{ats, format, llm, Analysis};
use crate::errors::AppError;
use crate::models::resume::ResumeFields;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub job_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub resume_id: Uuid,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// POST /resume/:id/analyze — heuristic pass plus LLM refinement.
/// The body is optional; a job description sharpens the scoring.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<AnalyzeRequest>>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let resume = state.store.get(id)?;
    let job_description = body.and_then(|Json(req)| req.job_description);

    let analysis = llm::analyze_resume(&state.llm, &resume, job_description.as_deref()).await?;
    state
        .store
        .cache_suggestions(id, analysis.suggestions.clone())?;
    tracing::info!("Analyzed resume {id} (ats_score={})", analysis.ats_score);

    Ok(Json(AnalysisResponse {
        resume_id: id,
        analysis,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct AtsOptimizeRequest {
    pub job_description: Option<String>,
}

/// POST /resume/:id/ats-optimize — the produced suggestions become the
/// most recent list served by GET /resume/:id/suggestions.
pub async fn handle_ats_optimize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<AtsOptimizeRequest>>,
) -> Result<Json<ats::AtsReport>, AppError> {
    let resume = state.store.get(id)?;
    let job_description = body.and_then(|Json(req)| req.job_description);
    let report = ats::optimize(&resume, job_description.as_deref());
    state.store.cache_suggestions(id, report.suggestions.clone())?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub resume_id: Uuid,
    pub suggestions: Vec<String>,
}

/// GET /resume/:id/suggestions
///
/// Returns the most recent suggestion list (cached by analyze). When no
/// cached list exists, recomputes one heuristically without an LLM call.
pub async fn handle_get_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let suggestions = match state.store.cached_suggestions(id)? {
        Some(cached) => cached,
        None => {
            let resume = state.store.get(id)?;
            let analysis = crate::analysis::analyzer::analyze(&resume);
            let mut suggestions = llm::fallback_suggestions(&analysis);
            suggestions.extend(format::findings(&resume.fields, &resume.raw_text));
            state.store.cache_suggestions(id, suggestions.clone())?;
            suggestions
        }
    };

    Ok(Json(SuggestionsResponse {
        resume_id: id,
        suggestions,
    }))
}

#[derive(Debug, Serialize)]
pub struct ImproveFormatResponse {
    pub resume_id: Uuid,
    pub improvements_applied: Vec<String>,
    pub summary: String,
    pub fields: ResumeFields,
}

/// POST /resume/:id/improve-format — applies safe normalizations to the
/// stored resume and reports what changed.
pub async fn handle_improve_format(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ImproveFormatResponse>, AppError> {
    let mut improvements = Vec::new();
    let updated = state.store.update(id, |resume| {
        improvements = format::apply_improvements(&mut resume.fields);
    })?;
    tracing::info!(
        "Applied {} formatting improvements to resume {id}",
        improvements.len()
    );

    let summary = format!("Applied {} formatting improvements", improvements.len());
    Ok(Json(ImproveFormatResponse {
        resume_id: id,
        improvements_applied: improvements,
        summary,
        fields: updated.fields,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmClient;
    use crate::matching::embeddings::TextEmbedder;
    use crate::matching::JobMatcher;
    use crate::models::resume::{ContactInfo, Resume, ResumeFields};
    use crate::store::ResumeStore;
    use crate::templates::TemplateCatalog;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;

    struct FixedEmbedder;

    #[async_trait]
    impl TextEmbedder for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, AppError> {
            Ok(vec![1.0, 0.0])
        }
    }

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(ResumeStore::new()),
            templates: Arc::new(TemplateCatalog::new()),
            llm: LlmClient::new("test-key".into(), "test-model".into()).unwrap(),
            matcher: Arc::new(JobMatcher::new(Arc::new(FixedEmbedder))),
            config: Config {
                openai_api_key: "test-key".into(),
                llm_model: "test-model".into(),
                embedding_model: "test-embedding".into(),
                max_upload_bytes: 1024,
                cors_allowed_origins: vec!["*".into()],
                port: 0,
                rust_log: "info".into(),
            },
        }
    }

    fn sample_resume() -> Resume {
        Resume {
            id: uuid::Uuid::new_v4(),
            filename: "r.pdf".into(),
            uploaded_at: Utc::now(),
            fields: ResumeFields {
                contact_info: ContactInfo {
                    name: "Jane Doe".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            raw_text: "Jane Doe\nExperience\nEducation\nSkills".into(),
            industry: None,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_ats_optimize_caches_suggestions_for_later_retrieval() {
        let state = test_state();
        let resume = sample_resume();
        let id = resume.id;
        state.store.insert(resume);
        assert_eq!(state.store.cached_suggestions(id).unwrap(), None);

        let Json(report) = handle_ats_optimize(State(state.clone()), Path(id), None)
            .await
            .unwrap();
        assert_eq!(
            state.store.cached_suggestions(id).unwrap(),
            Some(report.suggestions.clone())
        );

        let Json(resp) = handle_get_suggestions(State(state.clone()), Path(id))
            .await
            .unwrap();
        assert_eq!(resp.suggestions, report.suggestions);
    }
}
