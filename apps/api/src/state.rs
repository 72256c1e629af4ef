use std::sync::Arc;

use crate::interview::session::InterviewService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Interview orchestrator; owns the store and the collaborators.
    pub interviews: Arc<InterviewService>,
}
