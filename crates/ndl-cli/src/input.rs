//! Loading documents and policies from files or stdin.

use ndl_canonical::{Document, Policies, PolicyConfig};
use serde_json::Value;
use std::io::{self, Read};
use std::path::Path;

use crate::error::CliError;

const STDIN: &str = "-";

/// Reads a JSON document from `input`, or from stdin when absent or `-`.
pub fn read_document(input: Option<&str>) -> Result<Document, CliError> {
    let (origin, text) = match input {
        Some(path) if path != STDIN => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                origin: path.to_string(),
                source,
            })?;
            (path.to_string(), text)
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| CliError::Read {
                    origin: "stdin".to_string(),
                    source,
                })?;
            ("stdin".to_string(), buffer)
        }
    };
    tracing::debug!(origin = %origin, bytes = text.len(), "read document");
    parse_document(&origin, &text)
}

fn parse_document(origin: &str, text: &str) -> Result<Document, CliError> {
    let value: Value = serde_json::from_str(text).map_err(|source| CliError::Json {
        origin: origin.to_string(),
        source,
    })?;
    Ok(Document::from(value))
}

/// Builds policies from the optional policy file; no file means the defaults.
pub fn load_policies(path: Option<&Path>) -> Result<Policies, CliError> {
    let Some(path) = path else {
        return Ok(Policies::new());
    };
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        origin: origin.clone(),
        source,
    })?;
    let policies = PolicyConfig::from_json(&text)
        .and_then(|config| config.build())
        .map_err(|source| CliError::Policy {
            origin: origin.clone(),
            source,
        })?;
    tracing::debug!(
        origin = %origin,
        normalizers = policies.normalizers().len(),
        sorters = policies.sorters().len(),
        "loaded policies"
    );
    Ok(policies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_origin() {
        let err = parse_document("left.json", "{").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON in left.json"));
    }

    #[test]
    fn missing_policy_file_is_a_read_error() {
        let err = load_policies(Some(Path::new("/nonexistent/policy.json"))).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn errors_expose_their_origin() {
        let err = parse_document("left.json", "[").unwrap_err();
        assert_eq!(err.origin(), Some("left.json"));
        let err = load_policies(Some(Path::new("/nonexistent/policy.json"))).unwrap_err();
        assert_eq!(err.origin(), Some("/nonexistent/policy.json"));
    }

    #[test]
    fn no_policy_file_means_defaults() {
        let policies = load_policies(None).unwrap();
        assert!(policies.normalizers().is_empty());
        assert!(policies.sorters().is_empty());
    }
}
