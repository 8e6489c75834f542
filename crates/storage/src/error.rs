use std::time::Duration;

use thiserror::Error;

/// Errors that can occur during attachment storage operations.
///
/// "Object already absent" is deliberately not an error: removal reports it
/// as a successful no-op through its return value instead.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend refused the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// An I/O error occurred while talking to the backend.
    #[error("storage i/o error: {0}")]
    Io(String),

    /// The backend could not be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The backend did not respond within its own enforced duration.
    #[error("storage timeout after {0:?}")]
    Timeout(Duration),

    /// Any other backend-reported error.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    /// Returns `true` if the error is transient and the operation may
    /// succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_) | Self::Timeout(_))
    }
}
