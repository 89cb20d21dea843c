//! Credential pool errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the credential pool.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum CredentialError {
    /// The pool holds zero keys. Callers must degrade to static data
    /// instead of attempting network I/O.
    #[error("Credential pool is empty")]
    EmptyPool,
}
