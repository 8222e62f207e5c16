//! Error types for the contenthost core.

/// Core error type for configuration and upload planning.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The content type is not one of the accepted media types.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The declared upload size exceeds the limit.
    #[error("file too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Declared size in bytes.
        size: u64,
        /// Maximum accepted size in bytes.
        max: u64,
    },

    /// A required request field is empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
