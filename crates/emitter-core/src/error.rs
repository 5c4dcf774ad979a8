//! Error types for registry operations.

use thiserror::Error;

/// Errors that can occur while mutating the registry.
///
/// A listener that is not callable cannot be expressed through the
/// [`Handler`](crate::Handler) type, so registration has no validation
/// failure of its own; the only runtime fault is a poisoned lock.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// Lock poisoned (a thread panicked while holding the registry lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, EmitterError>;
