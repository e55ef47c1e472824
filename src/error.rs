//! Error types for wprich.

use thiserror::Error;

/// Result type for wprich operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the outer surfaces (output renderers, CLI I/O).
///
/// Turning HTML into a [`crate::Document`] never fails.
#[derive(Error, Debug)]
pub enum Error {
    /// Error occurred during file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred while serialising the document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
