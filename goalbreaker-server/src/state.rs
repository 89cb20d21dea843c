//! Application State
//!
//! Holds the shared components behind an `Arc`: credential pool, relay,
//! catalog, one-shot helpers, and the goal store. Cloned per request.

use std::sync::Arc;

use goalbreaker_core::upstream::build_http_client;
use goalbreaker_core::{
    CompletionRelay, CredentialPool, GoalStore, ModelCatalog, OneShotClient,
};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub relay: CompletionRelay,
    pub catalog: ModelCatalog,
    pub oneshot: OneShotClient,
    pub store: Arc<GoalStore>,
}

impl AppState {
    pub fn new(config: &ServerConfig, store: GoalStore) -> Self {
        let credentials = Arc::new(CredentialPool::new(config.api_keys.clone()));
        let client = build_http_client(
            config.relay.connect_timeout,
            config.relay.request_timeout,
        );

        let relay = CompletionRelay::new(
            config.relay.clone(),
            Arc::clone(&credentials),
            client.clone(),
        );
        let catalog = ModelCatalog::new(
            config.catalog.clone(),
            Arc::clone(&credentials),
            client.clone(),
        );
        let oneshot = OneShotClient::new(config.relay.clone(), credentials, client);

        Self {
            inner: Arc::new(AppStateInner { relay, catalog, oneshot, store: Arc::new(store) }),
        }
    }
}
