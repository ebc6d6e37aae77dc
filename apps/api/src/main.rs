mod analyzer;
mod config;
mod errors;
mod extract;
mod llm_client;
mod prompts;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::GroqClient;
use crate::prompts::PromptCatalog;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Load the prompt catalog once; it is immutable from here on
    let catalog = PromptCatalog::load(&config.prompts_file)?;
    info!("Prompt catalog loaded from {}", config.prompts_file);

    // Initialize LLM client (fails fast on an empty credential)
    let llm = GroqClient::new(&config.groq_api_key, &config.groq_api_url)?;
    info!("LLM client initialized (default model: {})", llm_client::DEFAULT_MODEL);

    let analyzer = ResumeAnalyzer::new(catalog, llm);

    // Build app state
    let state = AppState { analyzer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
