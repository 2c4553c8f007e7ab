//! Unified error type for the sniprate application.
//!
//! All modules funnel their failures into [`Error`], which carries enough
//! context for API handlers to derive an HTTP status code via
//! [`Error::http_status`].

/// Unified error type covering all failure modes in sniprate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The uploaded payload exceeds the configured size limit.
    #[error("File too large. Maximum file size is {}MB.", .limit / (1024 * 1024))]
    PayloadTooLarge {
        /// The configured limit in bytes.
        limit: u64,
    },

    /// The multipart body could not be read.
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// The uploaded bytes could not be decoded as an image.
    #[error("Image error: {source}")]
    Image {
        /// The underlying decode/encode error.
        #[from]
        source: image::ImageError,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::PayloadTooLarge { .. } => 400,
            Error::Multipart(_) => 400,
            Error::Image { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
