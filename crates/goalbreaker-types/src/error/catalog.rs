//! Model catalog errors.
//!
//! These never escape `list_models()` — the catalog degrades to cached or
//! static data instead — but the fetch path reports them internally so the
//! degradation can be logged with the real reason.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a live catalog fetch.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CatalogError {
    /// Non-200 from the models endpoint.
    #[error("Catalog fetch returned {status}")]
    FetchStatus { status: u16 },

    /// Connect failure or timeout.
    #[error("Catalog fetch failed: {message}")]
    Network { message: String },

    /// Body was not the expected `{data: [...]}` shape.
    #[error("Malformed catalog response: {message}")]
    Malformed { message: String },
}
