//! Construction-time configuration for the relay and the model catalog.
//!
//! These are plain value objects built once at startup and injected into
//! the core components. Model IDs, prompt text, and filter keywords are
//! product content, so they live here as overridable defaults instead of
//! being hardcoded in the relay.

use std::time::Duration;

use crate::catalog::{ModelFilter, ModelInfo, ModelSlot};

/// Default instruction prepended to every relayed conversation.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are 'The Smart Goal Breaker', a strategic agent. \
Classify the input: a greeting gets a short JSON message reply; a goal gets an analysis \
followed by JSON with a short title and exactly 5 actionable steps, each with a step name, \
a 1-10 complexity, and a description.";

/// Settings for the completion relay and the single-shot helpers.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// OpenAI-compatible API root, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    /// Sent as `HTTP-Referer` so the provider can attribute traffic.
    pub referer: String,
    /// Sent as `X-Title`.
    pub app_title: String,
    pub system_prompt: String,
    /// Cheap/fast model used by the title and slogan helpers.
    pub default_model: String,
    /// Tried in order when the requested model is unavailable.
    pub fallback_models: Vec<String>,
    pub connect_timeout: Duration,
    /// Total-read timeout; generous because large generations take time.
    pub request_timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            referer: "https://goalbreaker.app".to_string(),
            app_title: "Goal Breaker".to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            default_model: "google/gemini-2.0-flash-lite-preview-02-05:free".to_string(),
            fallback_models: Vec::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            temperature: 0.6,
            max_tokens: 4096,
        }
    }
}

/// Settings for the model catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Cached listings are served without a network call inside this window.
    pub ttl: Duration,
    pub fetch_timeout: Duration,
    pub filter: ModelFilter,
    /// When non-empty, slot mapping replaces filter + sort entirely and the
    /// listing has exactly this shape regardless of upstream catalog churn.
    pub slots: Vec<ModelSlot>,
    /// Served when there is no credential, no cache, and no live data.
    pub static_models: Vec<ModelInfo>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            ttl: Duration::from_secs(300),
            fetch_timeout: Duration::from_secs(10),
            filter: ModelFilter::FreeOnly,
            slots: Vec::new(),
            static_models: default_static_models(),
        }
    }
}

/// The embedded last-resort model table.
pub fn default_static_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new(
            "google/gemini-2.0-flash-lite-preview-02-05:free",
            "Gemini 2.0 Flash Lite",
            "Google",
            1_000_000,
        ),
        ModelInfo::new("deepseek/deepseek-r1:free", "DeepSeek R1", "DeepSeek", 128_000),
        ModelInfo::new(
            "mistralai/mistral-small-24b-instruct-2501:free",
            "Mistral Small 3",
            "Mistral",
            32_000,
        ),
        ModelInfo::new(
            "nvidia/llama-3.1-nemotron-70b-instruct:free",
            "Llama 3.1 Nemotron",
            "Nvidia",
            128_000,
        ),
    ]
}
