//! CodeQuest Engine - Backend for an AI-driven programming RPG
//!
//! The Engine is the backend server that:
//! - Walks a single player through class and path selection
//! - Generates coding quests and grades submissions with Gemini
//! - Tracks XP, levels, and attribute allocation
//! - Serves the browser client the screen to render as JSON

mod application;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::config::AppConfig;
use crate::infrastructure::http;
use crate::infrastructure::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codequest_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeQuest Engine");

    // Load configuration; a missing API key aborts startup
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Gemini: {} ({})", config.gemini_base_url, config.gemini_model);
    tracing::info!(
        "  Rules: {} XP per level, {} points per level",
        config.rules.xp_per_level,
        config.rules.points_per_level
    );

    let state = Arc::new(AppState::new(config)?);
    tracing::info!("Application state initialized");

    let port = state.config.server_port;
    let static_dir = state.config.static_dir.clone();

    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(http::create_routes());

    if let Some(dir) = static_dir {
        tracing::info!("  Serving browser client from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    let app = app
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
