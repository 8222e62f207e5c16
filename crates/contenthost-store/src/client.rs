//! Object store client bound to one bucket.
//!
//! URL helpers only sign; [`ObjectStoreClient::delete_object`] is the single
//! operation that talks to the store itself.

use contenthost_core::{ExpiryPolicy, StoreConfig, UploadPlan, plan_upload};
use contenthost_sign::{PresignedUrl, Presigner};
use http::StatusCode;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// Result of a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The store removed the object.
    Deleted,
    /// The object did not exist.
    AlreadyAbsent,
}

/// Map the status of a presigned DELETE to an outcome.
///
/// 200 and 204 mean the object was removed, 404 means it was already gone.
/// Every other status is a failure.
pub fn classify_delete_status(status: StatusCode) -> StoreResult<DeleteOutcome> {
    match status.as_u16() {
        200 | 204 => Ok(DeleteOutcome::Deleted),
        404 => Ok(DeleteOutcome::AlreadyAbsent),
        _ => Err(StoreError::Rejected {
            method: "DELETE",
            status,
        }),
    }
}

/// Presigned access to the configured bucket.
#[derive(Debug, Clone)]
pub struct ObjectStoreClient {
    presigner: Presigner,
    bucket: String,
    expiry: ExpiryPolicy,
    public_url: Option<String>,
    http: reqwest::Client,
}

impl ObjectStoreClient {
    /// Build a client from configuration, with an HTTP client that honours the
    /// configured request timeout.
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(StoreError::StorageUnavailable)?;
        Self::with_http_client(config, http)
    }

    /// Build a client from configuration and an existing HTTP client.
    pub fn with_http_client(config: &StoreConfig, http: reqwest::Client) -> StoreResult<Self> {
        let presigner = Presigner::new(
            config.credentials.clone(),
            config.region.clone(),
            config.endpoint.clone(),
        )?;
        Ok(Self {
            presigner,
            bucket: config.bucket.clone(),
            expiry: config.expiry,
            public_url: config.public_url.clone(),
            http,
        })
    }

    /// The bucket every key refers to.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The presigner used for every URL.
    #[must_use]
    pub fn presigner(&self) -> &Presigner {
        &self.presigner
    }

    /// Presigned PUT for a direct browser upload.
    pub fn upload_url(&self, key: &str, content_type: &str) -> StoreResult<PresignedUrl> {
        Ok(self
            .presigner
            .sign_put(&self.bucket, key, content_type, Some(self.expiry.upload))?)
    }

    /// Validate an upload, choose its key and sign the PUT for it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Core`] when the filename, content type or size is
    /// rejected, and [`StoreError::Sign`] if the URL cannot be signed.
    pub fn prepare_upload(
        &self,
        filename: &str,
        content_type: &str,
        size: Option<u64>,
    ) -> StoreResult<(UploadPlan, PresignedUrl)> {
        let plan = plan_upload(filename, content_type, size)?;
        let signed = self.upload_url(&plan.key, &plan.content_type)?;
        debug!(bucket = %self.bucket, key = %plan.key, file_id = %plan.file_id, "prepared upload");
        Ok((plan, signed))
    }

    /// Presigned GET for a short-lived download.
    pub fn download_url(&self, key: &str) -> StoreResult<PresignedUrl> {
        self.get_url(key, self.expiry.download)
    }

    /// Presigned GET for media shown on an embed page.
    pub fn embed_url(&self, key: &str) -> StoreResult<PresignedUrl> {
        self.get_url(key, self.expiry.embed)
    }

    /// Presigned GET with an explicit lifetime in seconds.
    pub fn get_url(&self, key: &str, expires_in: u64) -> StoreResult<PresignedUrl> {
        Ok(self
            .presigner
            .sign_get(&self.bucket, key, Some(expires_in))?)
    }

    /// Presigned DELETE.
    pub fn delete_url(&self, key: &str) -> StoreResult<PresignedUrl> {
        Ok(self
            .presigner
            .sign_delete(&self.bucket, key, Some(self.expiry.delete))?)
    }

    /// Unsigned public URL for a key, when the bucket has a public base URL.
    #[must_use]
    pub fn public_url(&self, key: &str) -> Option<String> {
        self.public_url
            .as_deref()
            .map(|base| format!("{base}/{key}"))
    }

    /// Delete an object through a presigned DELETE.
    ///
    /// A missing object counts as success. The request is sent once; retrying
    /// is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::StorageUnavailable`] if the store cannot be
    /// reached, [`StoreError::Rejected`] for any status other than 200, 204 or
    /// 404, and [`StoreError::Sign`] if the URL cannot be signed.
    pub async fn delete_object(&self, key: &str) -> StoreResult<DeleteOutcome> {
        let signed = self.delete_url(key)?;

        let response = self
            .http
            .delete(&signed.url)
            .send()
            .await
            .map_err(|e| {
                warn!(bucket = %self.bucket, key, error = %e, "object store unreachable");
                StoreError::StorageUnavailable(e)
            })?;

        let status = response.status();
        match classify_delete_status(status) {
            Ok(outcome) => {
                debug!(bucket = %self.bucket, key, ?outcome, "deleted object");
                Ok(outcome)
            }
            Err(e) => {
                warn!(bucket = %self.bucket, key, status = %status, "object store rejected delete");
                Err(e)
            }
        }
    }
}
