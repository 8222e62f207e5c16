//! Configuration, expiry policy and upload planning for contenthost.
//!
//! This crate holds the pieces shared by the object store client and the
//! command-line front end: environment-driven [`StoreConfig`], the
//! [`ExpiryPolicy`] for presigned URLs, and the upload planner that decides
//! object keys.

pub mod config;
mod error;
pub mod media;
mod types;

pub use config::StoreConfig;
pub use error::{CoreError, CoreResult};
pub use media::{UploadPlan, plan_upload};
pub use types::{ExpiryPolicy, MediaKind};
