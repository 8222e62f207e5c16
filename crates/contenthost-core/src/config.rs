//! Configuration management for the object store.
//!
//! All configuration is driven by environment variables, matching the `B2_*`
//! names the hosting platform injects.

use std::time::Duration;

use contenthost_sign::{Credentials, Endpoint};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::ExpiryPolicy;

/// Site that serves embed pages when `SITE_URL` is unset.
pub const DEFAULT_SITE_URL: &str = "https://contenthosting.org";

/// Timeout applied to object store requests when `STORE_REQUEST_TIMEOUT_SECS` is unset.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Object store configuration.
///
/// `Debug` output is safe to log: the secret half of the credentials is redacted.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bucket that holds every uploaded object.
    pub bucket: String,
    /// Signing region (the B2 region code).
    pub region: String,
    /// S3-compatible endpoint.
    pub endpoint: Endpoint,
    /// Application key id and secret.
    pub credentials: Credentials,
    /// Public base URL for media served straight from the bucket.
    pub public_url: Option<String>,
    /// Base URL of the site serving embed pages.
    pub site_url: String,
    /// Presigned URL lifetimes.
    pub expiry: ExpiryPolicy,
    /// Timeout for requests issued to the store.
    pub request_timeout: Duration,
    /// Log level.
    pub log_level: String,
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if a required variable is missing or a
    /// value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| CoreError::Config(format!("{name} is not set")))
        };
        let optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let seconds = |name: &str, default: u64| -> CoreResult<u64> {
            match optional(name) {
                None => Ok(default),
                Some(raw) => match raw.parse::<u64>() {
                    Ok(0) | Err(_) => Err(CoreError::Config(format!(
                        "{name} must be a positive integer, got {raw:?}"
                    ))),
                    Ok(value) => Ok(value),
                },
            }
        };

        let endpoint_raw = required("B2_ENDPOINT")?;
        let endpoint = Endpoint::parse(&endpoint_raw)
            .map_err(|e| CoreError::Config(format!("B2_ENDPOINT: {e}")))?;
        let credentials = Credentials::new(required("B2_KEY_ID")?, required("B2_APP_KEY")?)
            .map_err(|e| CoreError::Config(e.to_string()))?;

        let defaults = ExpiryPolicy::default();
        let expiry = ExpiryPolicy {
            upload: seconds("UPLOAD_URL_EXPIRES", defaults.upload)?,
            download: seconds("DOWNLOAD_URL_EXPIRES", defaults.download)?,
            delete: seconds("DELETE_URL_EXPIRES", defaults.delete)?,
            embed: seconds("EMBED_URL_EXPIRES", defaults.embed)?,
        };

        let config = Self {
            bucket: required("B2_BUCKET")?,
            region: required("B2_REGION")?,
            endpoint,
            credentials,
            public_url: optional("B2_PUBLIC_URL").map(|v| v.trim_end_matches('/').to_owned()),
            site_url: optional("SITE_URL")
                .map_or_else(|| DEFAULT_SITE_URL.to_owned(), |v| v.trim_end_matches('/').to_owned()),
            expiry,
            request_timeout: Duration::from_secs(seconds(
                "STORE_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT.as_secs(),
            )?),
            log_level: optional("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
        };

        debug!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = %config.endpoint,
            access_key_id = config.credentials.access_key_id(),
            "loaded store configuration"
        );

        Ok(config)
    }
}
