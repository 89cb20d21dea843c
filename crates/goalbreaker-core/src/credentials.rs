//! Credential pool: an ordered set of provider API keys with a rotation
//! cursor shared across in-flight requests.
//!
//! Rotation is best-effort, not a correctness-critical counter: two
//! concurrent rate-limit events may rotate past each other. The mutex is
//! held only across the index read-modify-write, never across I/O.

use parking_lot::Mutex;

use goalbreaker_types::CredentialError;

/// Ordered API keys plus the current-index cursor.
pub struct CredentialPool {
    keys: Vec<String>,
    cursor: Mutex<usize>,
}

impl CredentialPool {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, cursor: Mutex::new(0) }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The key at the current cursor.
    pub fn current(&self) -> Result<String, CredentialError> {
        let cursor = *self.cursor.lock();
        self.keys.get(cursor).cloned().ok_or(CredentialError::EmptyPool)
    }

    /// Advance the cursor by one, modulo pool size.
    ///
    /// Returns `false` when the advance wraps back to index 0 — the pool
    /// has been fully cycled and the caller should stop retrying. A pool
    /// with one key (or none) returns `false` immediately: there is no
    /// useful rotation.
    pub fn rotate(&self) -> bool {
        if self.keys.len() <= 1 {
            return false;
        }
        let mut cursor = self.cursor.lock();
        *cursor = (*cursor + 1) % self.keys.len();
        let wrapped = *cursor == 0;
        if wrapped {
            tracing::warn!("Credential pool fully cycled ({} keys)", self.keys.len());
        } else {
            tracing::debug!("Rotated to credential index {}", *cursor);
        }
        !wrapped
    }
}
