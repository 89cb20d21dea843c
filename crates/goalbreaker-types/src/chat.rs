//! Chat-completions wire types shared between the relay and the gateway.

use serde::{Deserialize, Serialize};

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single chat turn. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// True when the content is empty or whitespace-only. Blank messages
    /// are dropped before the payload goes upstream.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Inbound body of `POST /api/stream-goal`.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamRequest {
    pub messages: Vec<ChatMessage>,
    pub model: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Inbound body of `POST /api/generate-title`.
#[derive(Debug, Clone, Deserialize)]
pub struct TitleRequest {
    pub context: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::new(ChatRole::Assistant, "hi");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn test_blank_detection() {
        assert!(ChatMessage::user("   \n\t ").is_blank());
        assert!(!ChatMessage::user(" plan my week ").is_blank());
    }
}
