//! Environment-driven server configuration.
//!
//! Everything is read once at startup and turned into the typed config
//! objects the core components take at construction time.

use std::time::Duration;

use goalbreaker_types::{CatalogConfig, RelayConfig};

pub const DEFAULT_PORT: u16 = 8060;
const DEFAULT_DB_PATH: &str = "goalbreaker.db";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: String,
    /// Provider API key pool; empty means degraded static-data mode.
    pub api_keys: Vec<String>,
    pub relay: RelayConfig,
    pub catalog: CatalogConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("GOALBREAKER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let db_path =
            std::env::var("GOALBREAKER_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let api_keys = split_csv(&std::env::var("OPENROUTER_API_KEYS").unwrap_or_default());

        let mut relay = RelayConfig::default();
        let mut catalog = CatalogConfig::default();

        if let Ok(base_url) = std::env::var("OPENROUTER_BASE_URL") {
            let base_url = base_url.trim_end_matches('/').to_string();
            relay.base_url.clone_from(&base_url);
            catalog.base_url = base_url;
        }
        if let Ok(raw) = std::env::var("GOALBREAKER_FALLBACK_MODELS") {
            relay.fallback_models = split_csv(&raw);
        }
        if let Ok(model) = std::env::var("GOALBREAKER_DEFAULT_MODEL") {
            relay.default_model = model;
        }
        if let Some(secs) =
            std::env::var("GOALBREAKER_MODEL_TTL_SECS").ok().and_then(|v| v.parse().ok())
        {
            catalog.ttl = Duration::from_secs(secs);
        }

        Self { port, db_path, api_keys, relay, catalog }
    }
}

/// Split a comma-separated env value, dropping blank entries.
pub fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
