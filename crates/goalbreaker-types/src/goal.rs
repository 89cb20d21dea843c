//! Goal records and the history/slogan DTOs built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A persisted goal conversation. `chat_history` is the authoritative
/// conversation state; `breakdown` is a derived summary that may lag it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub model_label: String,
    pub breakdown: Value,
    pub thinking_text: Option<String>,
    pub chat_history: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Inbound body of `POST /api/goals/{user_id}` and `PUT /api/goals/{goal_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGoalRequest {
    pub title: String,
    pub chat_history: Value,
    #[serde(default)]
    pub preview: Option<Value>,
}

/// One entry of `GET /api/history/{user_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    pub goal: String,
    pub model: String,
    pub date: DateTime<Utc>,
    pub preview: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    pub chat_history: Value,
}

impl From<GoalRecord> for HistoryItem {
    fn from(record: GoalRecord) -> Self {
        Self {
            id: record.id,
            goal: record.title,
            model: record.model_label,
            date: record.updated_at,
            preview: record.breakdown,
            thinking: record.thinking_text,
            chat_history: record.chat_history,
        }
    }
}

/// One marketing slogan produced by the slogan helper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SloganItem {
    pub headline: String,
    pub subtext: String,
    pub example: String,
}

impl SloganItem {
    pub fn new(
        headline: impl Into<String>,
        subtext: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            headline: headline.into(),
            subtext: subtext.into(),
            example: example.into(),
        }
    }
}
