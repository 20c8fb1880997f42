use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::JobMatcher;
use crate::store::ResumeStore;
use crate::templates::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ResumeStore>,
    /// Immutable template catalog, built once at startup.
    pub templates: Arc<TemplateCatalog>,
    pub llm: LlmClient,
    /// Matcher owns the job-description embedding cache.
    pub matcher: Arc<JobMatcher>,
    pub config: Config,
}
