mod config;
mod document;
mod errors;
mod extraction;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::orchestrator::ResumeExtractor;
use crate::extraction::patterns::PatternLibrary;
use crate::extraction::tagger::HeuristicTagger;
use crate::extraction::vocabulary::SkillVocabulary;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume extractor v{}", env!("CARGO_PKG_VERSION"));

    let patterns = PatternLibrary::with_name_templates(config.name_templates.clone())?;
    let vocabulary = SkillVocabulary::new(config.skills.clone())?;
    info!(
        "Pattern library v{} loaded, {} name templates, {} skills",
        patterns.version,
        patterns.name_templates.len(),
        vocabulary.len()
    );

    let extractor = ResumeExtractor::new(Arc::new(patterns), vocabulary, Arc::new(HeuristicTagger));

    let state = AppState {
        config: config.clone(),
        extractor: Arc::new(extractor),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
