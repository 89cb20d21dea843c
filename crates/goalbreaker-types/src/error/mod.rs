//! Typed error definitions for the Goal Breaker gateway.
//!
//! Failures are explicit values rather than swallowed exceptions: the
//! relay's control flow branches on variants, the gateway maps them to
//! HTTP statuses, and everything serializes for API responses and logs.

mod catalog;
mod credential;
mod relay;
mod store;

pub use catalog::CatalogError;
pub use credential::CredentialError;
pub use relay::RelayError;
pub use store::StoreError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type that wraps all domain-specific errors.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "domain", content = "error")]
pub enum GatewayError {
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Standard Result type using GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let err = GatewayError::Relay(RelayError::UpstreamStatus {
            status: 404,
            body: "No endpoints found".to_string(),
        });

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("Relay"));
        assert!(json.contains("404"));

        let deserialized: GatewayError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }

    #[test]
    fn test_error_display() {
        let err = GatewayError::Store(StoreError::NotFound { id: 42 });
        let msg = format!("{}", err);
        assert!(msg.contains("42"));
    }
}
