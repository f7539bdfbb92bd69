use std::sync::Arc;

use crate::analysis::analyzer::StructuredAnalyzer;
use crate::config::Config;
use crate::github::ProfileFetcher;

/// Shared application state injected into all route handlers via Axum
/// extractors. Both collaborators are stateless and shared read-only across
/// concurrent requests; per-request pipeline state stays local to the
/// invocation.
#[derive(Clone)]
pub struct AppState {
    /// Profile fetcher behind a trait object so tests can swap in a mock.
    pub fetcher: Arc<dyn ProfileFetcher>,
    pub analyzer: StructuredAnalyzer,
    pub config: Config,
}
