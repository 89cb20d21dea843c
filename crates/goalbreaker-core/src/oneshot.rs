//! Single-shot helpers: conversation titles and marketing slogans.
//!
//! Cosmetic features with an "always succeeds" contract: one request to
//! the cheap default model, whole-body parse, and a fixed embedded
//! fallback on any failure. Failures are logged, never propagated.

use std::sync::Arc;

use rand::Rng;
use serde_json::{json, Value};

use goalbreaker_types::{RelayConfig, RelayError, SloganItem};

use crate::credentials::CredentialPool;
use crate::upstream::provider_headers;

/// Title served when generation fails.
pub const FALLBACK_TITLE: &str = "New Strategy";

const MAX_SLOGANS: usize = 20;

const TITLE_SYSTEM_PROMPT: &str = "You are a title generator. Create a concise, \
action-oriented title (max 6 words) for this conversation. Return ONLY the title \
text, no quotes.";

const SLOGAN_SYSTEM_PROMPT: &str =
    "You are a creative director. Output strictly raw JSON array of 20 items.";

/// Non-streaming requests against the default model.
pub struct OneShotClient {
    config: RelayConfig,
    credentials: Arc<CredentialPool>,
    client: reqwest::Client,
}

impl OneShotClient {
    pub fn new(
        config: RelayConfig,
        credentials: Arc<CredentialPool>,
        client: reqwest::Client,
    ) -> Self {
        Self { config, credentials, client }
    }

    /// A short title for the conversation summary, or the fixed fallback.
    pub async fn generate_title(&self, context: &str) -> String {
        let user = format!("Conversation context:\n{}", context);
        match self.complete(TITLE_SYSTEM_PROMPT, &user, 0.5, 20).await {
            Ok(content) => {
                let title = content.trim().trim_matches(['"', '\'']).trim();
                if title.is_empty() {
                    FALLBACK_TITLE.to_string()
                } else {
                    title.to_string()
                }
            },
            Err(err) => {
                tracing::warn!("Title generation failed: {}", err);
                FALLBACK_TITLE.to_string()
            },
        }
    }

    /// Up to 20 fresh slogans, or the embedded fallback list.
    pub async fn generate_slogans(&self) -> Vec<SloganItem> {
        // A random seed keeps the model from repeating itself across calls.
        let seed: u32 = rand::thread_rng().gen_range(1..=100_000);
        let prompt = format!(
            "Generate exactly 20 distinct slogans for an AI goal-breakdown tool.\n\
             Random Seed: {}\n\
             Vary the tone significantly and use niche example goals.\n\
             Format: JSON array of objects with keys \"headline\" (max 5 words), \
             \"subtext\" (max 10 words), \"example\" (one specific goal).\n\
             Output strictly raw JSON. No markdown.",
            seed
        );

        match self.complete(SLOGAN_SYSTEM_PROMPT, &prompt, 1.0, 2500).await {
            Ok(content) => match parse_slogans(&content) {
                Some(slogans) if !slogans.is_empty() => slogans,
                _ => {
                    tracing::warn!("Slogan response did not contain a usable array");
                    fallback_slogans()
                },
            },
            Err(err) => {
                tracing::warn!("Slogan generation failed: {}", err);
                fallback_slogans()
            },
        }
    }

    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, RelayError> {
        let key = self.credentials.current().map_err(|_| RelayError::NoCredentials)?;
        let payload = json!({
            "model": self.config.default_model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "stream": false,
            "temperature": temperature,
            "max_tokens": max_tokens,
        });

        let url = format!("{}/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .headers(provider_headers(&self.config, &key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Connect { message: e.to_string() })?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::UpstreamStatus { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::Malformed { message: e.to_string() })?;
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RelayError::Malformed {
                message: "missing choices[0].message.content".to_string(),
            })
    }
}

/// Bracket-match the first `[` to the last `]` and parse the slice as a
/// slogan array. Models love wrapping JSON in prose; this strips it.
fn parse_slogans(content: &str) -> Option<Vec<SloganItem>> {
    let array = extract_json_array(content)?;
    let mut slogans: Vec<SloganItem> = serde_json::from_str(array).ok()?;
    slogans.truncate(MAX_SLOGANS);
    Some(slogans)
}

fn extract_json_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

/// Embedded fallback so the landing page stays varied when the API fails.
pub fn fallback_slogans() -> Vec<SloganItem> {
    vec![
        SloganItem::new("Action Over Anxiety", "Stop overthinking. Get a plan.", "Launch a Podcast"),
        SloganItem::new("Complexity Killer", "We eat big goals for breakfast.", "Learn Japanese"),
        SloganItem::new("The Blueprint Engine", "Your ambition, architected.", "Build a Tiny House"),
        SloganItem::new("Zero to One", "The fastest path from idea to execution.", "Write a Novel"),
        SloganItem::new("Crush the Chaos", "Turn messy thoughts into clear steps.", "Plan a Euro Trip"),
        SloganItem::new("Dream Big, Step Small", "Momentum starts with one step.", "Train for a Triathlon"),
        SloganItem::new("The Strategy Machine", "AI that thinks like a CEO.", "Scale My Business"),
        SloganItem::new("Career Pivot", "Switch lanes with confidence.", "Become a Data Scientist"),
    ]
}
