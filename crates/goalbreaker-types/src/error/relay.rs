//! Completion relay errors.
//!
//! Every variant is terminal from the caller's point of view: by the time
//! one of these is yielded, the relay has already exhausted its credential
//! rotations and fallback models.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terminal failure of a streamed or single-shot completion.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum RelayError {
    /// No API key configured; no network call was attempted.
    #[error("No credentials configured")]
    NoCredentials,

    /// Upstream answered with a non-200 status the relay could not recover
    /// from. Carries the real status and body so operators see the reason.
    #[error("Upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The connection could not be established.
    #[error("Connection failed: {message}")]
    Connect { message: String },

    /// The connection dropped or timed out mid-stream, after zero or more
    /// fragments were already delivered.
    #[error("Stream interrupted: {message}")]
    Stream { message: String },

    /// A single-shot response body was not the expected shape. The
    /// streaming path never raises this; it skips malformed lines instead.
    #[error("Malformed response: {message}")]
    Malformed { message: String },
}

impl RelayError {
    /// Upstream status carried by this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure happened before any content was produced.
    pub fn is_pre_stream(&self) -> bool {
        !matches!(self, Self::Stream { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accessor() {
        let err = RelayError::UpstreamStatus { status: 429, body: "rate limited".into() };
        assert_eq!(err.status(), Some(429));
        assert_eq!(RelayError::NoCredentials.status(), None);
    }

    #[test]
    fn test_stream_errors_are_post_stream() {
        assert!(!RelayError::Stream { message: "reset".into() }.is_pre_stream());
        assert!(RelayError::Connect { message: "refused".into() }.is_pre_stream());
    }
}
