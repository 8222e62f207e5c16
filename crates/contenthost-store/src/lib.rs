//! Presigned object store client for contenthost.
//!
//! [`ObjectStoreClient`] binds a [`Presigner`](contenthost_sign::Presigner) to
//! the configured bucket and expiry policy. Upload, download and embed URLs are
//! produced without touching the network; deletes go straight to the store
//! through a presigned DELETE, treating an already-missing object as success.

mod client;
mod error;

pub use client::{DeleteOutcome, ObjectStoreClient, classify_delete_status};
pub use error::{StoreError, StoreResult};
