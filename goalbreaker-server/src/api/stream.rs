//! The streaming goal endpoint.
//!
//! Validation happens here, before the relay is invoked; the relay itself
//! never sees an empty conversation. The response is a chunked text/plain
//! stream of fragments. A relay failure becomes one final `Error: ` line
//! so the client can tell a clean finish from an interrupted one. When
//! the client disconnects, axum drops the body stream, which drops the
//! relay's upstream connection instead of draining it to completion.

use axum::body::Body;
use axum::extract::{Json, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use futures::StreamExt;

use goalbreaker_types::chat::StreamRequest;

use crate::state::AppState;

/// Longest accepted final message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

pub async fn stream_goal(
    State(state): State<AppState>,
    Json(request): Json<StreamRequest>,
) -> Result<Response, (StatusCode, String)> {
    validate(&request).map_err(|reason| (StatusCode::BAD_REQUEST, reason.to_string()))?;

    let fragments = state.inner.relay.stream_completion(request.messages, &request.model);
    let body = Body::from_stream(fragments.map(|item| {
        Ok::<_, std::convert::Infallible>(match item {
            Ok(text) => Bytes::from(text),
            Err(err) => Bytes::from(format!("Error: {}", err)),
        })
    }));

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

fn validate(request: &StreamRequest) -> Result<(), &'static str> {
    if request.messages.is_empty() {
        return Err("empty_messages");
    }
    if request.model.trim().is_empty() {
        return Err("missing_model");
    }
    if let Some(last) = request.messages.last() {
        if last.content.chars().count() > MAX_MESSAGE_CHARS {
            return Err("message_too_long");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalbreaker_types::ChatMessage;

    fn request(messages: Vec<ChatMessage>, model: &str) -> StreamRequest {
        StreamRequest { messages, model: model.to_string(), user_id: None }
    }

    #[test]
    fn test_empty_message_list_is_rejected() {
        let err = validate(&request(vec![], "modelA")).unwrap_err();
        assert_eq!(err, "empty_messages");
    }

    #[test]
    fn test_missing_model_is_rejected() {
        let err = validate(&request(vec![ChatMessage::user("hi")], "  ")).unwrap_err();
        assert_eq!(err, "missing_model");
    }

    #[test]
    fn test_overlong_final_message_is_rejected() {
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        let err = validate(&request(vec![ChatMessage::user(long)], "modelA")).unwrap_err();
        assert_eq!(err, "message_too_long");
    }

    #[test]
    fn test_boundary_length_is_accepted() {
        let exact = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(validate(&request(vec![ChatMessage::user(exact)], "modelA")).is_ok());
    }
}
