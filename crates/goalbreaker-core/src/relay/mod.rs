//! Completion relay: converts an inbound chat request into a streaming
//! provider call and yields text fragments as they arrive.
//!
//! The attempt loop is an explicit state machine rather than exception
//! plumbing: every upstream status is classified as stream, rotate
//! credential, next model, or terminal, and total attempts are bounded by
//! `attempt_models × max(1, pool_size)`. Once a 200 stream has started
//! there are no further retries — a transport failure after that point is
//! surfaced as a terminal fragment, never a silent truncation.

mod sse;
mod status;

pub use sse::{decode_sse_stream, SseEvent, SseLineDecoder};
pub use status::{classify_status, StatusAction, MODEL_STATUS_CODES, ROTATABLE_STATUS_CODES};


use std::sync::Arc;

use futures::{Stream, StreamExt};

use goalbreaker_types::{ChatMessage, RelayConfig, RelayError};

use crate::credentials::CredentialPool;
use crate::upstream::{build_chat_payload, provider_headers};

/// Streams provider completions with credential rotation and model
/// fallback. Cheap to construct; holds only shared handles.
pub struct CompletionRelay {
    config: RelayConfig,
    credentials: Arc<CredentialPool>,
    client: reqwest::Client,
}

impl CompletionRelay {
    pub fn new(
        config: RelayConfig,
        credentials: Arc<CredentialPool>,
        client: reqwest::Client,
    ) -> Self {
        Self { config, credentials, client }
    }

    /// Lazy sequence of text fragments for one conversation.
    ///
    /// Finite and not restartable. At most one `Err` is produced and it is
    /// always the final item; dropping the stream aborts the upstream
    /// connection, so an abandoned client does not keep draining quota.
    pub fn stream_completion(
        &self,
        messages: Vec<ChatMessage>,
        model: &str,
    ) -> impl Stream<Item = Result<String, RelayError>> + Send + 'static {
        let config = self.config.clone();
        let credentials = Arc::clone(&self.credentials);
        let client = self.client.clone();
        let requested = model.to_string();

        async_stream::stream! {
            let url = format!("{}/chat/completions", config.base_url);
            let attempt_models: Vec<String> = std::iter::once(requested.clone())
                .chain(config.fallback_models.iter().cloned())
                .collect();
            let mut last_error =
                RelayError::UpstreamStatus { status: 0, body: "no attempt made".to_string() };

            'models: for model_id in &attempt_models {
                let payload = build_chat_payload(&config, &messages, model_id, true);
                let mut failed_attempts = 0usize;

                loop {
                    let key = match credentials.current() {
                        Ok(key) => key,
                        Err(_) => {
                            yield Err(RelayError::NoCredentials);
                            return;
                        },
                    };

                    tracing::debug!(
                        "Relaying to {} (attempt {} of {})",
                        model_id,
                        failed_attempts + 1,
                        credentials.len().max(1)
                    );

                    let response = match client
                        .post(&url)
                        .headers(provider_headers(&config, &key))
                        .json(&payload)
                        .send()
                        .await
                    {
                        Ok(response) => response,
                        Err(e) => {
                            yield Err(RelayError::Connect { message: e.to_string() });
                            return;
                        },
                    };

                    let status_code = response.status().as_u16();
                    match classify_status(status_code) {
                        StatusAction::Stream => {
                            if model_id != &requested {
                                tracing::info!("Serving {} via fallback model {}", requested, model_id);
                            }
                            let fragments = decode_sse_stream(response.bytes_stream());
                            futures::pin_mut!(fragments);
                            while let Some(item) = fragments.next().await {
                                yield item;
                            }
                            return;
                        },
                        StatusAction::RotateCredential => {
                            let body = response.text().await.unwrap_or_default();
                            tracing::warn!(
                                "Credential rejected for {} (status {}), rotating",
                                model_id,
                                status_code
                            );
                            last_error =
                                RelayError::UpstreamStatus { status: status_code, body };
                            failed_attempts += 1;
                            if failed_attempts >= credentials.len() || !credentials.rotate() {
                                continue 'models;
                            }
                        },
                        StatusAction::NextModel => {
                            let body = response.text().await.unwrap_or_default();
                            tracing::warn!(
                                "Model {} unavailable (status {}), advancing attempt list",
                                model_id,
                                status_code
                            );
                            last_error =
                                RelayError::UpstreamStatus { status: status_code, body };
                            continue 'models;
                        },
                        StatusAction::Terminal => {
                            let body = response.text().await.unwrap_or_default();
                            yield Err(RelayError::UpstreamStatus { status: status_code, body });
                            return;
                        },
                    }
                }
            }

            yield Err(last_error);
        }
    }
}
