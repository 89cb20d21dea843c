//! Goal Breaker Server - gateway daemon
//!
//! A pure Rust HTTP gateway that:
//! - Relays streaming goal conversations to the LLM provider on /api/stream-goal
//! - Serves the model catalog, title, and slogan helpers
//! - Persists goal history in SQLite

use std::net::SocketAddr;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod router;
mod state;

use config::ServerConfig;
use goalbreaker_core::GoalStore;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!("🚀 Goal Breaker server starting on port {}...", config.port);

    if config.api_keys.is_empty() {
        warn!("⚠️ No provider API keys configured; serving static fallbacks only");
    } else {
        info!("📊 Loaded {} provider credential(s)", config.api_keys.len());
    }

    let store = GoalStore::open(&config.db_path)
        .map_err(|e| anyhow::anyhow!("Failed to open goal store: {}", e))?;
    info!("💾 Goal store ready at {}", config.db_path);

    let state = AppState::new(&config, store);
    let app = router::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("✅ Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
