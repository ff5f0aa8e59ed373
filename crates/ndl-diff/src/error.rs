//! Error types for diff operations.

use ndl_canonical::EncodeError;
use thiserror::Error;

/// Errors that can occur while diffing two documents.
///
/// Content differences are never errors; only a canonical tree that cannot
/// be rendered as text is.
#[derive(Error, Debug)]
pub enum DiffError {
    /// A leaf has no textual form under the configured encoder.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodeError),
    /// The serializer failed to render an encodable tree.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DiffError {
    /// Path of the canonical node that could not be rendered, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            DiffError::Encoding(err) => err.path(),
            DiffError::Serialization(_) => None,
        }
    }
}
