use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use goalbreaker_types::CatalogConfig;

use super::ModelCatalog;
use crate::credentials::CredentialPool;
use crate::upstream::build_http_client;

fn catalog_against(server_uri: &str, ttl: Duration, keys: Vec<String>) -> ModelCatalog {
    let config = CatalogConfig {
        base_url: server_uri.to_string(),
        ttl,
        fetch_timeout: Duration::from_secs(2),
        ..CatalogConfig::default()
    };
    let client = build_http_client(Duration::from_secs(2), Duration::from_secs(5));
    ModelCatalog::new(config, Arc::new(CredentialPool::new(keys)), client)
}

fn live_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "deepseek/deepseek-r1:free",
                "name": "deepseek/deepseek-r1",
                "context_length": 128000
            },
            {
                "id": "google/gemini-2.0-flash-lite-preview-02-05:free",
                "name": "google/gemini-2.0-flash-lite",
                "context_length": 1000000
            },
            {
                "id": "openai/gpt-4o",
                "name": "openai/gpt-4o",
                "context_length": 128000
            }
        ]
    })
}

#[tokio::test]
async fn test_fresh_cache_skips_second_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(1)
        .mount(&server)
        .await;

    let catalog =
        catalog_against(&server.uri(), Duration::from_secs(300), vec!["sk-1".into()]);

    let first = catalog.list_models().await;
    let second = catalog.list_models().await;

    // FreeOnly filter drops gpt-4o; deterministic provider/name sort.
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fetch_failure_serves_static_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let catalog =
        catalog_against(&server.uri(), Duration::from_secs(300), vec!["sk-1".into()]);
    let models = catalog.list_models().await;

    assert_eq!(models, CatalogConfig::default().static_models);
}

#[tokio::test]
async fn test_stale_cache_preferred_over_static_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // Zero TTL: the second call misses the cache and hits the failing mock.
    let catalog = catalog_against(&server.uri(), Duration::ZERO, vec!["sk-1".into()]);

    let first = catalog.list_models().await;
    let second = catalog.list_models().await;

    assert_eq!(first, second);
    assert_ne!(second, CatalogConfig::default().static_models);
}

#[tokio::test]
async fn test_zero_credentials_never_touch_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(live_body()))
        .expect(0)
        .mount(&server)
        .await;

    let catalog = catalog_against(&server.uri(), Duration::from_secs(300), vec![]);
    let models = catalog.list_models().await;

    assert_eq!(models, CatalogConfig::default().static_models);
}

#[tokio::test]
async fn test_empty_filtered_result_still_refreshes_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "openai/gpt-4o", "name": "openai/gpt-4o", "context_length": 128000}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let catalog =
        catalog_against(&server.uri(), Duration::from_secs(300), vec!["sk-1".into()]);

    assert!(catalog.list_models().await.is_empty());
    // Second call is served from the (empty) cache, not a second fetch.
    assert!(catalog.list_models().await.is_empty());
}
