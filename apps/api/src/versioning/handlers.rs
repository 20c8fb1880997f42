use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeVersion;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateVersionRequest {
    pub changes: Option<String>,
}

/// POST /resume/:id/version — snapshots the current structured fields.
pub async fn handle_create_version(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<CreateVersionRequest>>,
) -> Result<Json<ResumeVersion>, AppError> {
    let changes = body.and_then(|Json(req)| req.changes);
    let version = state.store.create_version(id, changes)?;
    tracing::info!("Created version {} for resume {id}", version.version);
    Ok(Json(version))
}

#[derive(Debug, Serialize)]
pub struct VersionListResponse {
    pub resume_id: Uuid,
    pub versions: Vec<ResumeVersion>,
}

/// GET /resume/:id/versions — creation order.
pub async fn handle_list_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VersionListResponse>, AppError> {
    let versions = state.store.list_versions(id)?;
    Ok(Json(VersionListResponse {
        resume_id: id,
        versions,
    }))
}

/// GET /resume/:id/version/:n
pub async fn handle_get_version(
    State(state): State<AppState>,
    Path((id, number)): Path<(Uuid, u32)>,
) -> Result<Json<ResumeVersion>, AppError> {
    Ok(Json(state.store.get_version(id, number)?))
}
