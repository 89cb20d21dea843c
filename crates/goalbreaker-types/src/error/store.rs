//! Goal store errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the SQLite goal store.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum StoreError {
    /// No goal row with this id.
    #[error("Goal {id} not found")]
    NotFound { id: i64 },

    /// Underlying database failure.
    #[error("Database error: {message}")]
    Database { message: String },

    /// A JSON column failed to encode or decode.
    #[error("Encoding error: {message}")]
    Encoding { message: String },
}

impl StoreError {
    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database { message: err.to_string() }
    }

    /// HTTP status the gateway maps this error to.
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Database { .. } | Self::Encoding { .. } => 500,
        }
    }
}
