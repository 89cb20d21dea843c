//! SQLite persistence for goal records.
//!
//! The lifecycle is entirely owner-driven: rows are created on first save,
//! mutated on update, and removed by explicit delete or bulk history
//! clear. No background expiry. JSON columns hold the chat history (the
//! authoritative conversation state) and the derived breakdown summary.

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, Row};
use serde_json::Value;

use goalbreaker_types::{GoalRecord, SaveGoalRequest, StoreError};

/// Label recorded when the client does not name a model.
pub const DEFAULT_MODEL_LABEL: &str = "Multi-Agent";

/// Connection-owning store. Methods are synchronous; async callers go
/// through `spawn_blocking`.
pub struct GoalStore {
    conn: Mutex<Connection>,
}

impl GoalStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::database)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::database)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// All goals for one owner, most recently updated first.
    pub fn list_history(&self, owner_id: &str) -> Result<Vec<GoalRecord>, StoreError> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(
                "SELECT id, owner_id, title, model_label, breakdown, thinking_text,
                        chat_history, created_at, updated_at
                 FROM goals WHERE owner_id = ?1 ORDER BY updated_at DESC, id DESC",
            )
            .map_err(StoreError::database)?;

        let rows = stmt
            .query_map(params![owner_id], record_from_row)
            .map_err(StoreError::database)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(StoreError::database)?);
        }
        Ok(records)
    }

    /// Insert a new goal; returns its id.
    pub fn create_goal(
        &self,
        owner_id: &str,
        request: &SaveGoalRequest,
    ) -> Result<i64, StoreError> {
        let now = Utc::now().timestamp();
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO goals (owner_id, title, model_label, breakdown, thinking_text,
                                chat_history, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6, ?6)",
            params![
                owner_id,
                request.title,
                DEFAULT_MODEL_LABEL,
                encode_optional_json(request.preview.as_ref())?,
                encode_json(&request.chat_history)?,
                now,
            ],
        )
        .map_err(StoreError::database)?;
        Ok(conn.last_insert_rowid())
    }

    /// Update title and chat history; the breakdown only when one is
    /// provided, so a stale client cannot blank it.
    pub fn update_goal(&self, goal_id: i64, request: &SaveGoalRequest) -> Result<(), StoreError> {
        let now = Utc::now().timestamp();
        let conn = self.conn.lock();
        let affected = conn
            .execute(
                "UPDATE goals
                 SET title = ?2,
                     chat_history = ?3,
                     breakdown = COALESCE(?4, breakdown),
                     updated_at = ?5
                 WHERE id = ?1",
                params![
                    goal_id,
                    request.title,
                    encode_json(&request.chat_history)?,
                    encode_optional_json(request.preview.as_ref())?,
                    now,
                ],
            )
            .map_err(StoreError::database)?;

        if affected == 0 {
            return Err(StoreError::NotFound { id: goal_id });
        }
        Ok(())
    }

    pub fn delete_goal(&self, goal_id: i64) -> Result<(), StoreError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM goals WHERE id = ?1", params![goal_id])
            .map_err(StoreError::database)?;
        Ok(())
    }

    /// Remove every goal belonging to one owner; returns how many went.
    pub fn clear_history(&self, owner_id: &str) -> Result<usize, StoreError> {
        let conn = self.conn.lock();
        conn.execute("DELETE FROM goals WHERE owner_id = ?1", params![owner_id])
            .map_err(StoreError::database)
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL,
            model_label TEXT NOT NULL,
            breakdown TEXT,
            thinking_text TEXT,
            chat_history TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )
    .map_err(StoreError::database)?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals (owner_id, updated_at DESC)",
        [],
    )
    .map_err(StoreError::database)?;

    Ok(())
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<GoalRecord> {
    Ok(GoalRecord {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        model_label: row.get(3)?,
        breakdown: decode_json(row.get::<_, Option<String>>(4)?),
        thinking_text: row.get(5)?,
        chat_history: decode_json(row.get::<_, Option<String>>(6)?),
        created_at: timestamp_to_datetime(row.get(7)?),
        updated_at: timestamp_to_datetime(row.get(8)?),
    })
}

fn encode_json(value: &Value) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Encoding { message: e.to_string() })
}

fn encode_optional_json(value: Option<&Value>) -> Result<Option<String>, StoreError> {
    value.map(encode_json).transpose()
}

/// Missing or unreadable JSON columns decode to an empty list, matching
/// what the history endpoint promises its clients.
fn decode_json(column: Option<String>) -> Value {
    column
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_else(|| Value::Array(Vec::new()))
}

fn timestamp_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}
