//! Shared plumbing for outbound provider calls: the HTTP client and its
//! timeouts, auth headers, and chat-completions payload assembly.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};

use goalbreaker_types::{ChatMessage, RelayConfig};

/// Build the outbound HTTP client. Every call through it carries both a
/// connect timeout and a total timeout; there is no unbounded wait.
pub fn build_http_client(connect_timeout: Duration, request_timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Auth and attribution headers for one provider call.
pub fn provider_headers(config: &RelayConfig, api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", api_key)) {
        headers.insert(AUTHORIZATION, value);
    }
    if let Ok(value) = HeaderValue::from_str(&config.referer) {
        headers.insert("HTTP-Referer", value);
    }
    if let Ok(value) = HeaderValue::from_str(&config.app_title) {
        headers.insert("X-Title", value);
    }
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Assemble a chat-completions payload: system instruction first, then the
/// caller's messages with blank ones dropped.
pub fn build_chat_payload(
    config: &RelayConfig,
    messages: &[ChatMessage],
    model: &str,
    stream: bool,
) -> Value {
    let mut api_messages = vec![json!({"role": "system", "content": config.system_prompt})];
    api_messages.extend(
        messages
            .iter()
            .filter(|m| !m.is_blank())
            .map(|m| serde_json::to_value(m).unwrap_or_default()),
    );

    json!({
        "model": model,
        "messages": api_messages,
        "stream": stream,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalbreaker_types::ChatRole;

    #[test]
    fn test_payload_prepends_system_and_drops_blanks() {
        let config = RelayConfig::default();
        let messages = vec![
            ChatMessage::user("break down my goal"),
            ChatMessage::new(ChatRole::Assistant, "   "),
            ChatMessage::user("learn piano"),
        ];

        let payload = build_chat_payload(&config, &messages, "deepseek/deepseek-r1:free", true);
        let sent = payload["messages"].as_array().unwrap();

        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0]["role"], "system");
        assert_eq!(sent[1]["content"], "break down my goal");
        assert_eq!(sent[2]["content"], "learn piano");
        assert_eq!(payload["stream"], true);
    }

    #[test]
    fn test_payload_of_only_blank_messages_is_system_only() {
        let config = RelayConfig::default();
        let messages = vec![ChatMessage::user("\t\n"), ChatMessage::user(" ")];

        let payload = build_chat_payload(&config, &messages, "m", true);
        assert_eq!(payload["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_headers_carry_bearer_key() {
        let headers = provider_headers(&RelayConfig::default(), "sk-or-test");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-or-test");
        assert!(headers.contains_key("HTTP-Referer"));
    }
}
