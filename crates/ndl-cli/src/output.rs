//! Output formatting utilities.

use ndl_canonical::{to_json_value, CanonicalDocument, IsoDateEncoder};

use crate::error::CliError;

/// Formats a canonical document as indented JSON.
pub fn format_document(document: &CanonicalDocument) -> Result<String, CliError> {
    let value = to_json_value(document.as_document(), Some(&IsoDateEncoder))?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// One-word verdict printed by `compare`.
pub fn verdict(matched: bool) -> &'static str {
    if matched {
        "match"
    } else {
        "mismatch"
    }
}
