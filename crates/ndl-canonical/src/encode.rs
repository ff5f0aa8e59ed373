use crate::document::{Document, Scalar};
use crate::normalizer::ISO_DATE_FORMAT;
use crate::path::Path;
use serde_json::{Map, Number, Value};
use std::fmt;
use thiserror::Error;

/// Error returned when a document cannot be represented as JSON.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A leaf has no JSON form and no encoder handled it.
    #[error("no encoding for {kind} leaf at {path}")]
    UnencodableLeaf {
        /// Rendered path of the leaf.
        path: String,
        /// Scalar kind of the leaf.
        kind: &'static str,
    },
    /// NaN or an infinity, which JSON cannot carry.
    #[error("non-finite number at {path}")]
    NonFiniteNumber {
        /// Rendered path of the leaf.
        path: String,
    },
    /// The canonical JSON encoder rejected the value.
    #[error("canonical JSON encoding failed: {0}")]
    Canonical(String),
}

impl EncodeError {
    /// Rendered path of the offending leaf, when the error concerns one.
    pub fn path(&self) -> Option<&str> {
        match self {
            EncodeError::UnencodableLeaf { path, .. } | EncodeError::NonFiniteNumber { path } => {
                Some(path)
            }
            EncodeError::Canonical(_) => None,
        }
    }
}

/// Encodes leaf kinds that have no native JSON form, such as dates.
pub trait LeafEncoder: fmt::Debug + Send + Sync {
    /// Returns the JSON form of `value`, or `None` if this encoder does not handle it.
    fn encode(&self, value: &Scalar) -> Option<Value>;
}

/// Encodes dates as `YYYY-MM-DD` and date-times as ISO 8601 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateEncoder;

impl LeafEncoder for IsoDateEncoder {
    fn encode(&self, value: &Scalar) -> Option<Value> {
        match value {
            Scalar::Date(date) => Some(Value::String(date.format(ISO_DATE_FORMAT).to_string())),
            Scalar::DateTime(datetime) => Some(Value::String(
                datetime.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            )),
            _ => None,
        }
    }
}

/// Converts a document to a JSON value, consulting `encoder` for date leaves.
pub fn to_json_value(
    document: &Document,
    encoder: Option<&dyn LeafEncoder>,
) -> Result<Value, EncodeError> {
    encode_at(document, &Path::root(), encoder)
}

fn encode_at(
    document: &Document,
    path: &Path,
    encoder: Option<&dyn LeafEncoder>,
) -> Result<Value, EncodeError> {
    match document {
        Document::Mapping(entries) => {
            let mut map = Map::new();
            for (key, child) in entries {
                map.insert(key.clone(), encode_at(child, &path.child(key), encoder)?);
            }
            Ok(Value::Object(map))
        }
        Document::Sequence(elements) => elements
            .iter()
            .enumerate()
            .map(|(idx, child)| encode_at(child, &path.index(idx), encoder))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Document::Scalar(scalar) => encode_scalar(scalar, path, encoder),
    }
}

fn encode_scalar(
    scalar: &Scalar,
    path: &Path,
    encoder: Option<&dyn LeafEncoder>,
) -> Result<Value, EncodeError> {
    match scalar {
        Scalar::Null => Ok(Value::Null),
        Scalar::Bool(b) => Ok(Value::Bool(*b)),
        Scalar::Int(i) => Ok(Value::from(*i)),
        Scalar::UInt(u) => Ok(Value::from(*u)),
        Scalar::String(s) => Ok(Value::String(s.clone())),
        Scalar::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(|| EncodeError::NonFiniteNumber {
                path: path.to_string(),
            }),
        Scalar::Date(_) | Scalar::DateTime(_) => encoder
            .and_then(|e| e.encode(scalar))
            .ok_or_else(|| EncodeError::UnencodableLeaf {
                path: path.to_string(),
                kind: scalar.kind(),
            }),
    }
}
