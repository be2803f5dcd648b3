//! Error types for the dropzone library.
//!
//! File rejections are not errors: they are reported as data through
//! [`FileRejection`](crate::validation::FileRejection). This type covers the
//! unexpected failures that surface through the `on_error` callback or from
//! fallible constructors.

use thiserror::Error;

/// Errors that can occur while handling drop zone events or building files.
#[derive(Error, Debug)]
pub enum DropzoneError {
    /// An I/O error occurred while reading a file from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Files could not be extracted from a native event.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A configuration document could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Convenience type alias for Results using DropzoneError.
pub type Result<T> = std::result::Result<T, DropzoneError>;
