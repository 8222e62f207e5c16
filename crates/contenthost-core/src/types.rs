//! Shared value types.

use contenthost_sign::{
    DELETE_EXPIRES_SECS, DOWNLOAD_EXPIRES_SECS, EMBED_EXPIRES_SECS, UPLOAD_EXPIRES_SECS,
};

/// How long each kind of presigned URL stays valid, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryPolicy {
    /// Upload (PUT) URLs.
    pub upload: u64,
    /// Download (GET) URLs.
    pub download: u64,
    /// Delete URLs.
    pub delete: u64,
    /// GET URLs handed to embed pages.
    pub embed: u64,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            upload: UPLOAD_EXPIRES_SECS,
            download: DOWNLOAD_EXPIRES_SECS,
            delete: DELETE_EXPIRES_SECS,
            embed: EMBED_EXPIRES_SECS,
        }
    }
}

/// Broad media category of an upload, which also picks its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `video/*` uploads, stored under `videos/`.
    Video,
    /// Everything else accepted, stored under `images/`.
    Image,
}

impl MediaKind {
    /// Classify a content type.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Key prefix (folder) for this kind.
    #[must_use]
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Video => "videos",
            Self::Image => "images",
        }
    }
}
