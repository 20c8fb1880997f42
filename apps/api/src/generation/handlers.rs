use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::{attachment_filename, render, OutputFormat};
use crate::models::template::LayoutOverrides;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    pub template_id: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "docx".to_string()
}

/// POST /resume/:id/generate?template_id=&format=
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<GenerateQuery>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let format = OutputFormat::parse(&query.format)?;
    let resume = state.store.get(id)?;
    let template = state.templates.get(&query.template_id)?;

    let bytes = render(&resume, &template.layout, format)?;
    tracing::info!(
        "Generated {} ({} bytes) for resume {id} with template '{}'",
        query.format,
        bytes.len(),
        template.id
    );

    Ok((binary_headers(&resume, format)?, bytes))
}

#[derive(Debug, Deserialize)]
pub struct GenerateCustomRequest {
    pub template_id: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub layout: LayoutOverrides,
}

/// POST /resume/:id/generate-custom — body layout overrides merged over
/// the chosen template.
pub async fn handle_generate_custom(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(req): axum::Json<GenerateCustomRequest>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let format = OutputFormat::parse(&req.format)?;
    let resume = state.store.get(id)?;
    let template = state.templates.get(&req.template_id)?;
    let layout = template.layout.merged_with(&req.layout);

    let bytes = render(&resume, &layout, format)?;
    tracing::info!(
        "Generated custom {} ({} bytes) for resume {id} from template '{}'",
        req.format,
        bytes.len(),
        template.id
    );

    Ok((binary_headers(&resume, format)?, bytes))
}

fn binary_headers(
    resume: &crate::models::resume::Resume,
    format: OutputFormat,
) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(format.content_type()),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        attachment_filename(resume, format)
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid disposition header: {e}")))?,
    );
    Ok(headers)
}
