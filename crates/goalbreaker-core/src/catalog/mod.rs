//! Model catalog: a TTL-cached listing of available models.
//!
//! The listing never fails. A fresh cache entry is served verbatim; a miss
//! triggers one bounded-timeout fetch; any fetch failure degrades to the
//! last successful cache, then to the static table embedded in config.
//! Catalog failures never rotate credentials.

mod slots;

pub use slots::{resolve_slots, KeywordMatcher, SlotMatcher};

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use serde_json::Value;

use goalbreaker_types::catalog::{title_case, DEFAULT_CONTEXT_LENGTH};
use goalbreaker_types::{CatalogConfig, CatalogError, ModelInfo};

use crate::credentials::CredentialPool;

struct CatalogCache {
    models: Vec<ModelInfo>,
    fetched_at: Instant,
}

/// Resolves the displayable model list against the provider's catalog.
pub struct ModelCatalog {
    config: CatalogConfig,
    credentials: Arc<CredentialPool>,
    client: reqwest::Client,
    matcher: Box<dyn SlotMatcher>,
    cache: Mutex<Option<CatalogCache>>,
}

impl ModelCatalog {
    pub fn new(
        config: CatalogConfig,
        credentials: Arc<CredentialPool>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            config,
            credentials,
            client,
            matcher: Box::new(KeywordMatcher),
            cache: Mutex::new(None),
        }
    }

    /// Swap the slot-matching strategy (tests substitute deterministic ones).
    pub fn with_matcher(mut self, matcher: Box<dyn SlotMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// The current model list, freshest available flavor.
    pub async fn list_models(&self) -> Vec<ModelInfo> {
        if let Some(models) = self.cached_fresh() {
            return models;
        }

        // Zero credentials: static data, no network call.
        if self.credentials.is_empty() {
            tracing::warn!("No credentials configured, serving static model table");
            return self.config.static_models.clone();
        }

        match self.fetch().await {
            Ok(live) => {
                let resolved = self.resolve(live);
                // Refresh the timestamp even when the filtered result is
                // empty, so a thin upstream catalog doesn't get hammered.
                self.store_cache(resolved.clone());
                resolved
            },
            Err(err) => {
                tracing::warn!("Catalog fetch failed ({}), serving degraded data", err);
                self.cached_stale()
                    .unwrap_or_else(|| self.config.static_models.clone())
            },
        }
    }

    fn resolve(&self, live: Vec<ModelInfo>) -> Vec<ModelInfo> {
        if !self.config.slots.is_empty() {
            return resolve_slots(&self.config.slots, &live, self.matcher.as_ref());
        }

        let mut kept: Vec<ModelInfo> =
            live.into_iter().filter(|m| self.config.filter.matches(&m.id)).collect();
        kept.sort_by(|a, b| a.provider.cmp(&b.provider).then_with(|| a.name.cmp(&b.name)));
        kept
    }

    async fn fetch(&self) -> Result<Vec<ModelInfo>, CatalogError> {
        let key = self
            .credentials
            .current()
            .map_err(|e| CatalogError::Network { message: e.to_string() })?;

        let url = format!("{}/models", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&key)
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .map_err(|e| CatalogError::Network { message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::FetchStatus { status: status.as_u16() });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| CatalogError::Malformed { message: e.to_string() })?;
        let data = body
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| CatalogError::Malformed { message: "missing data array".to_string() })?;

        Ok(data.iter().filter_map(parse_entry).collect())
    }

    fn cached_fresh(&self) -> Option<Vec<ModelInfo>> {
        let cache = self.cache.lock();
        cache
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.config.ttl)
            .map(|entry| entry.models.clone())
    }

    /// A stale cache beats returning nothing.
    fn cached_stale(&self) -> Option<Vec<ModelInfo>> {
        self.cache.lock().as_ref().map(|entry| entry.models.clone())
    }

    fn store_cache(&self, models: Vec<ModelInfo>) {
        *self.cache.lock() = Some(CatalogCache { models, fetched_at: Instant::now() });
    }
}

fn parse_entry(value: &Value) -> Option<ModelInfo> {
    let id = value.get("id")?.as_str()?;
    let mut info = ModelInfo::from_id(id);

    if let Some(name) = value.get("name").and_then(Value::as_str) {
        info.name = title_case(name.rsplit('/').next().unwrap_or(name));
        if let Some((namespace, _)) = name.split_once('/') {
            info.provider = title_case(namespace);
        }
    }
    if let Some(context_length) = value.get("context_length").and_then(Value::as_u64) {
        info.context_length = context_length.min(u64::from(u32::MAX)) as u32;
    } else {
        info.context_length = DEFAULT_CONTEXT_LENGTH;
    }

    Some(info)
}
