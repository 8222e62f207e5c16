//! Error types for object store operations.

use contenthost_core::CoreError;
use contenthost_sign::SignError;

/// Errors returned by [`ObjectStoreClient`](crate::ObjectStoreClient).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Signing failed before any request was made.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// Configuration or planning failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store could not be reached or the transfer failed.
    #[error("object store unavailable: {0}")]
    StorageUnavailable(#[source] reqwest::Error),

    /// The store answered with a status that is neither success nor "not found".
    #[error("object store rejected {method} request with status {status}")]
    Rejected {
        /// HTTP method of the rejected request.
        method: &'static str,
        /// Status returned by the store.
        status: http::StatusCode,
    },
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
