mod analysis;
mod config;
mod errors;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::pdf::PdfTextExtractor;
use crate::analysis::resume_analyzer::ResumeAnalyzer;
use crate::analysis::segmenter::UnicodeSentenceSplitter;
use crate::config::Config;
use crate::interview::question_generator::QuestionGenerator;
use crate::interview::session::InterviewService;
use crate::llm_client::LlmClient;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::store::InterviewStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interview API v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(InterviewStore::new(config.database_file.clone()));
    info!("Interview store at {}", store.path().display());

    let llm = LlmClient::new(&config)?;
    info!("LLM client initialized (model: {})", llm.model());

    let interviews = InterviewService::new(
        store,
        Arc::new(PdfTextExtractor),
        ResumeAnalyzer::new(Arc::new(UnicodeSentenceSplitter)),
        QuestionGenerator::new(Arc::new(llm)),
    );

    let state = AppState {
        interviews: Arc::new(interviews),
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);
    info!("CORS origins: {:?}", config.cors_allowed_origins);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
