use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::template::Template;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListTemplatesQuery {
    pub industry: Option<String>,
}

/// GET /templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(query): Query<ListTemplatesQuery>,
) -> Json<Vec<Template>> {
    let templates = match &query.industry {
        Some(industry) => state.templates.list_for_industry(industry),
        None => state.templates.list(),
    };
    Json(templates.into_iter().cloned().collect())
}

/// GET /templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Template>, AppError> {
    Ok(Json(state.templates.get(&id)?.clone()))
}

/// GET /industries
pub async fn handle_list_industries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.templates.industries())
}
