pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/upload", post(handlers::handle_upload))
        .route("/submit-answer", post(handlers::handle_submit_answer))
        .route("/get-next-question", get(handlers::handle_get_next_question))
        .route("/clear-database", post(handlers::handle_clear_database))
        .with_state(state)
}

/// CORS restricted to the configured origins, with credentials.
/// Methods and headers are mirrored since wildcards are not allowed alongside credentials.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
