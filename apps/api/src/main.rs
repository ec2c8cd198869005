mod config;
mod errors;
mod experience;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::experience::reference::ReferenceData;
use crate::experience::ExperienceEngine;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting FitGate API v{}", env!("CARGO_PKG_VERSION"));

    // Reference data is loaded once and never mutated afterwards
    let reference = match &config.reference_data_path {
        Some(path) => ReferenceData::load(path)
            .with_context(|| format!("loading reference data from {}", path.display()))?,
        None => ReferenceData::builtin(),
    };
    info!(
        "Reference data loaded ({} well-known employers)",
        reference.employer_count()
    );

    let engine = Arc::new(ExperienceEngine::with_reference(reference));
    info!("Role families: {}", engine.router().families().join(", "));

    let state = AppState {
        config: config.clone(),
        engine,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
