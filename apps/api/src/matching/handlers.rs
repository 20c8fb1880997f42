use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::MatchResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobMatchRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct JobMatchResponse {
    pub resume_id: Uuid,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// POST /resume/:id/match-job
pub async fn handle_match_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<JobMatchRequest>,
) -> Result<Json<JobMatchResponse>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }

    let resume = state.store.get(id)?;
    let result = state
        .matcher
        .match_resume(&state.store, &state.llm, &resume, &req.job_description)
        .await?;
    tracing::info!(
        "Matched resume {id} (overall={}, similarity={})",
        result.overall_match_score,
        result.similarity_score
    );

    Ok(Json(JobMatchResponse {
        resume_id: id,
        result,
    }))
}
