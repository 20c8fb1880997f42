use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ContactInfo;
use crate::state::AppState;

/// Summary returned after upload.
#[derive(Debug, Serialize)]
pub struct ResumeSummary {
    pub id: Uuid,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub contact_info: ContactInfo,
    pub summary: Option<String>,
    pub experience_count: usize,
    pub education_count: usize,
    pub skills_count: usize,
}

/// POST /resume/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeSummary>, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| AppError::Validation("Filename is required".to_string()))?;
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            file = Some((filename, bytes.to_vec()));
        }
    }

    let (filename, bytes) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' form field".to_string()))?;

    let resume = crate::ingest::parse_upload(&bytes, &filename, state.config.max_upload_bytes)?;
    tracing::info!(
        "Parsed resume {} from '{}' ({} bytes)",
        resume.id,
        filename,
        bytes.len()
    );

    let summary = ResumeSummary {
        id: resume.id,
        filename: resume.filename.clone(),
        uploaded_at: resume.uploaded_at,
        contact_info: resume.fields.contact_info.clone(),
        summary: resume.fields.summary.clone(),
        experience_count: resume.fields.experience.len(),
        education_count: resume.fields.education.len(),
        skills_count: resume.fields.skills.len(),
    };
    state.store.insert(resume);
    Ok(Json(summary))
}

/// GET /resume/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<crate::models::resume::Resume>, AppError> {
    Ok(Json(state.store.get(id)?))
}

/// DELETE /resume/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.store.delete(id)?;
    tracing::info!("Deleted resume {id}");
    Ok(Json(json!({ "message": "Resume deleted successfully" })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateResumeRequest {
    pub industry: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// PUT /resume/:id — metadata update (industry, tags).
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<crate::models::resume::Resume>, AppError> {
    let updated = state.store.update(id, |resume| {
        if let Some(industry) = req.industry {
            resume.industry = Some(industry);
        }
        if let Some(tags) = req.tags {
            resume.tags = tags;
        }
    })?;
    Ok(Json(updated))
}
