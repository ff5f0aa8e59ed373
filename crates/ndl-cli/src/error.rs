//! CLI error type.

use ndl_canonical::{EncodeError, PolicyError};
use ndl_diff::DiffError;
use thiserror::Error;

/// Errors reported by CLI commands; each one exits with status 2.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file could not be read.
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    /// Input is not JSON.
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    /// Policy file is malformed or names an unknown policy.
    #[error("invalid policy file {origin}: {source}")]
    Policy {
        origin: String,
        #[source]
        source: PolicyError,
    },
    /// Canonical form has no JSON encoding.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Diff could not be produced.
    #[error(transparent)]
    Diff(#[from] DiffError),
    /// Output could not be rendered.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// File, stream or document path the error concerns, if any.
    pub fn origin(&self) -> Option<&str> {
        match self {
            CliError::Read { origin, .. }
            | CliError::Json { origin, .. }
            | CliError::Policy { origin, .. } => Some(origin),
            CliError::Encode(err) => err.path(),
            CliError::Diff(err) => err.path(),
            CliError::Output(_) => None,
        }
    }
}
