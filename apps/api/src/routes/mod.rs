pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{analysis, coaching, generation, ingest, matching, templates, versioning};

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume lifecycle
        .route("/resume/upload", post(ingest::handlers::handle_upload))
        .route(
            "/resume/:id",
            get(ingest::handlers::handle_get_resume)
                .put(ingest::handlers::handle_update_resume)
                .delete(ingest::handlers::handle_delete_resume),
        )
        // Analysis
        .route(
            "/resume/:id/analyze",
            post(analysis::handlers::handle_analyze),
        )
        .route(
            "/resume/:id/ats-optimize",
            post(analysis::handlers::handle_ats_optimize),
        )
        .route(
            "/resume/:id/suggestions",
            get(analysis::handlers::handle_get_suggestions),
        )
        .route(
            "/resume/:id/improve-format",
            post(analysis::handlers::handle_improve_format),
        )
        // Matching
        .route(
            "/resume/:id/match-job",
            post(matching::handlers::handle_match_job),
        )
        // Generation
        .route(
            "/resume/:id/generate",
            post(generation::handlers::handle_generate),
        )
        .route(
            "/resume/:id/generate-custom",
            post(generation::handlers::handle_generate_custom),
        )
        // Coaching
        .route(
            "/resume/:id/cover-letter",
            post(coaching::handlers::handle_cover_letter),
        )
        .route(
            "/resume/:id/interview-questions",
            post(coaching::handlers::handle_interview_questions),
        )
        .route(
            "/resume/:id/interview-answer",
            post(coaching::handlers::handle_interview_answer),
        )
        // Versioning
        .route(
            "/resume/:id/version",
            post(versioning::handlers::handle_create_version),
        )
        .route(
            "/resume/:id/versions",
            get(versioning::handlers::handle_list_versions),
        )
        .route(
            "/resume/:id/version/:n",
            get(versioning::handlers::handle_get_version),
        )
        // Templates
        .route("/templates", get(templates::handlers::handle_list_templates))
        .route(
            "/templates/:id",
            get(templates::handlers::handle_get_template),
        )
        .route(
            "/industries",
            get(templates::handlers::handle_list_industries),
        )
        // Slack over the file limit covers multipart framing so oversized
        // files hit the parser's own size check and its 400 response.
        .layer(DefaultBodyLimit::max(upload_limit + 64 * 1024))
        .with_state(state)
}
