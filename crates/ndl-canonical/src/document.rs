use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Nested value made of mappings, sequences and scalar leaves.
///
/// Variant order is the cross-category sort order: scalars sort before
/// sequences, sequences before mappings. Within a category, mappings compare
/// by their `(key, value)` pairs in key order and sequences element-wise, both
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Document {
    /// Atomic leaf.
    Scalar(Scalar),
    /// Ordered list of documents.
    Sequence(Vec<Document>),
    /// String-keyed mapping; iteration is always in key order.
    Mapping(BTreeMap<String, Document>),
}

impl Document {
    /// Builds a mapping from key/value pairs. Later duplicates replace earlier ones.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Document)>,
    {
        Document::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds a sequence from elements.
    pub fn sequence<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        Document::Sequence(elements.into_iter().collect())
    }

    /// The `null` leaf.
    pub fn null() -> Self {
        Document::Scalar(Scalar::Null)
    }

    /// Category label used in logs and error messages.
    pub fn category(&self) -> &'static str {
        match self {
            Document::Scalar(_) => "scalar",
            Document::Sequence(_) => "sequence",
            Document::Mapping(_) => "mapping",
        }
    }

    /// Returns the leaf if this is a scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Document::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&BTreeMap<String, Document>> {
        match self {
            Document::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a mapping entry by key.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }
}

/// Scalar leaf of a [`Document`].
///
/// Ordering across kinds is `Null < Bool < numbers < String < Date < DateTime`.
/// The three numeric kinds compare by exact numeric value; equal values are
/// ordered `Int < UInt < Float`, so `1` and `1.0` are distinct leaves. Floats
/// use IEEE total ordering, which makes `NaN` equal to itself.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// JSON `null`.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer above `i64::MAX`.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Calendar date with no textual form of its own.
    Date(NaiveDate),
    /// Date and time of day with no textual form of its own.
    DateTime(NaiveDateTime),
}

impl Scalar {
    /// Kind label used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::UInt(_) => "uint",
            Scalar::Float(_) => "float",
            Scalar::String(_) => "string",
            Scalar::Date(_) => "date",
            Scalar::DateTime(_) => "datetime",
        }
    }

    /// True for the three numeric kinds.
    pub fn is_number(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_))
    }

    fn rank(&self) -> u8 {
        match self {
            Scalar::Null => 0,
            Scalar::Bool(_) => 1,
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => 2,
            Scalar::String(_) => 3,
            Scalar::Date(_) => 4,
            Scalar::DateTime(_) => 5,
        }
    }

    fn numeric_rank(&self) -> u8 {
        match self {
            Scalar::Int(_) => 0,
            Scalar::UInt(_) => 1,
            _ => 2,
        }
    }

    fn as_i128(&self) -> Option<i128> {
        match self {
            Scalar::Int(v) => Some(i128::from(*v)),
            Scalar::UInt(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

/// Exact comparison of an integer against a float.
fn cmp_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // Integers here lie in [-2^63, 2^64).
    if float >= 18_446_744_073_709_551_616.0 {
        return Ordering::Less;
    }
    if float < -9_223_372_036_854_775_808.0 {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    let fraction = float - whole;
    int.cmp(&(whole as i128)).then_with(|| {
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

fn cmp_numbers(a: &Scalar, b: &Scalar) -> Ordering {
    let by_value = match (a, b) {
        (Scalar::Float(x), Scalar::Float(y)) => x.total_cmp(y),
        (Scalar::Float(x), other) => other
            .as_i128()
            .map(|i| cmp_int_float(i, *x).reverse())
            .unwrap_or(Ordering::Equal),
        (other, Scalar::Float(y)) => other
            .as_i128()
            .map(|i| cmp_int_float(i, *y))
            .unwrap_or(Ordering::Equal),
        _ => a.as_i128().cmp(&b.as_i128()),
    };
    by_value.then_with(|| a.numeric_rank().cmp(&b.numeric_rank()))
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => Ordering::Equal,
            (Scalar::Bool(a), Scalar::Bool(b)) => a.cmp(b),
            (Scalar::String(a), Scalar::String(b)) => a.cmp(b),
            (Scalar::Date(a), Scalar::Date(b)) => a.cmp(b),
            (Scalar::DateTime(a), Scalar::DateTime(b)) => a.cmp(b),
            (a, b) if a.is_number() && b.is_number() => cmp_numbers(a, b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Document::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => Document::Sequence(items.into_iter().map(Into::into).collect()),
            Value::Null => Document::Scalar(Scalar::Null),
            Value::Bool(b) => Document::Scalar(Scalar::Bool(b)),
            Value::String(s) => Document::Scalar(Scalar::String(s)),
            Value::Number(n) => {
                let scalar = if let Some(i) = n.as_i64() {
                    Scalar::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Scalar::UInt(u)
                } else {
                    n.as_f64().map(Scalar::Float).unwrap_or(Scalar::Null)
                };
                Document::Scalar(scalar)
            }
        }
    }
}

impl From<&Value> for Document {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}

impl From<Scalar> for Document {
    fn from(scalar: Scalar) -> Self {
        Document::Scalar(scalar)
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::Scalar(Scalar::String(value.to_string()))
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::Scalar(Scalar::String(value))
    }
}

impl From<NaiveDate> for Document {
    fn from(value: NaiveDate) -> Self {
        Document::Scalar(Scalar::Date(value))
    }
}

impl From<NaiveDateTime> for Document {
    fn from(value: NaiveDateTime) -> Self {
        Document::Scalar(Scalar::DateTime(value))
    }
}
