//! Deterministic text rendering of canonical documents.

use crate::error::DiffError;
use ndl_canonical::{to_json_value, CanonicalDocument, LeafEncoder};
use std::fmt;

/// Renders a canonical document as stable, line-oriented text.
///
/// Equal canonical documents must render to identical text, and a structural
/// difference must show up on the lines of the differing subtree.
pub trait DocumentSerializer: fmt::Debug + Send + Sync {
    /// Renders `document`.
    fn serialize(&self, document: &CanonicalDocument) -> Result<String, DiffError>;
}

/// Two-space indented JSON, keys in canonical order.
///
/// Dates have no JSON form; without an encoder a date leaf fails with
/// [`DiffError::Encoding`].
#[derive(Debug, Default)]
pub struct PrettyJsonSerializer {
    encoder: Option<Box<dyn LeafEncoder>>,
}

impl PrettyJsonSerializer {
    /// Serializer without a leaf encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `encoder` for leaves JSON cannot carry natively.
    pub fn with_encoder<E: LeafEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Some(Box::new(encoder));
        self
    }
}

impl DocumentSerializer for PrettyJsonSerializer {
    fn serialize(&self, document: &CanonicalDocument) -> Result<String, DiffError> {
        let value = to_json_value(document.as_document(), self.encoder.as_deref())?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}
