use std::sync::Arc;

use crate::config::Config;
use crate::extraction::orchestrator::ResumeExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup from the configured vocabulary and name templates.
    pub extractor: Arc<ResumeExtractor>,
}
