//! Upload planning and embed helpers.
//!
//! Before a client uploads, the server decides where the object lives: a short
//! random file id, a folder chosen by media kind, and an extension taken from
//! the filename or the content type.

use crate::error::{CoreError, CoreResult};
use crate::types::MediaKind;

/// Largest upload accepted: 500 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Length of a generated file id, in hex characters.
pub const FILE_ID_LEN: usize = 12;

/// Content types accepted for upload, with their fallback extensions.
const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("video/mp4", ".mp4"),
    ("video/webm", ".webm"),
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/x-png", ".png"),
    ("image/gif", ".gif"),
];

/// Where an upload goes and what the uploader must send.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPlan {
    /// Short public identifier.
    pub file_id: String,
    /// Object key inside the bucket, `{folder}/{file_id}{ext}`.
    pub key: String,
    /// Content type the PUT must carry.
    pub content_type: String,
    /// Media category.
    pub kind: MediaKind,
}

/// Validate an upload request and choose its object key.
///
/// # Errors
///
/// Returns [`CoreError::MissingField`] for an empty filename or content type,
/// [`CoreError::UnsupportedContentType`] for anything but the accepted image
/// and video types, and [`CoreError::FileTooLarge`] when `size` exceeds
/// [`MAX_UPLOAD_BYTES`].
pub fn plan_upload(filename: &str, content_type: &str, size: Option<u64>) -> CoreResult<UploadPlan> {
    plan_upload_with_id(filename, content_type, size, &generate_file_id())
}

/// Same as [`plan_upload`] with a caller-chosen file id.
pub fn plan_upload_with_id(
    filename: &str,
    content_type: &str,
    size: Option<u64>,
    file_id: &str,
) -> CoreResult<UploadPlan> {
    if filename.is_empty() {
        return Err(CoreError::MissingField("filename"));
    }
    if content_type.is_empty() {
        return Err(CoreError::MissingField("contentType"));
    }
    if !is_accepted_content_type(content_type) {
        return Err(CoreError::UnsupportedContentType(content_type.to_owned()));
    }
    if let Some(size) = size {
        if size > MAX_UPLOAD_BYTES {
            return Err(CoreError::FileTooLarge {
                size,
                max: MAX_UPLOAD_BYTES,
            });
        }
    }

    let kind = MediaKind::from_content_type(content_type);
    let extension = file_extension(filename, content_type);

    Ok(UploadPlan {
        file_id: file_id.to_owned(),
        key: format!("{}/{file_id}{extension}", kind.folder()),
        content_type: content_type.to_owned(),
        kind,
    })
}

/// Whether uploads of this content type are accepted.
///
/// Parameterized PNG variants such as `image/png; charset=binary` pass.
#[must_use]
pub fn is_accepted_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/png;")
        || ACCEPTED_TYPES.iter().any(|(ty, _)| *ty == content_type)
}

/// Pick the extension: the filename's own (lowercased) if it has one, else the
/// content type's, else nothing.
#[must_use]
pub fn file_extension(filename: &str, content_type: &str) -> String {
    if let Some((_, ext)) = filename.rsplit_once('.') {
        if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return format!(".{}", ext.to_ascii_lowercase());
        }
    }

    ACCEPTED_TYPES
        .iter()
        .find(|(ty, _)| *ty == content_type)
        .map(|(_, ext)| (*ext).to_owned())
        .unwrap_or_default()
}

/// Generate a 12-character lowercase hex file id.
#[must_use]
pub fn generate_file_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(FILE_ID_LEN);
    id
}

/// URL of the public embed page for a file.
#[must_use]
pub fn embed_page_url(site_url: &str, file_id: &str) -> String {
    format!("{}/embed/{file_id}", site_url.trim_end_matches('/'))
}

/// HTML snippet that embeds a file page in an iframe.
#[must_use]
pub fn embed_code(embed_url: &str) -> String {
    format!(
        r#"<iframe src="{embed_url}" width="100%" height="450" frameborder="0" allowfullscreen></iframe>"#
    )
}
