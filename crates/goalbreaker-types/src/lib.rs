//! # Goal Breaker Types
//!
//! Shared data model for the Goal Breaker gateway: chat protocol types,
//! model catalog descriptors, goal records, and typed error definitions.
//! No I/O lives here; this crate is consumed by both `goalbreaker-core`
//! and `goalbreaker-server`.

pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod goal;

// Re-export commonly used types
pub use catalog::{ModelFilter, ModelInfo, ModelSlot};
pub use chat::{ChatMessage, ChatRole, StreamRequest};
pub use config::{CatalogConfig, RelayConfig};
pub use error::{CatalogError, CredentialError, GatewayError, RelayError, StoreError};
pub use goal::{GoalRecord, HistoryItem, SaveGoalRequest, SloganItem};
