//! Canonical form for nested mapping/sequence documents.
//!
//! A [`Document`] is canonicalized by a depth-first walk that orders mapping
//! keys, reorders sequences according to the first applicable
//! [`SequenceSorter`], and rewrites scalar leaves with the first applicable
//! [`Normalizer`]. Which policy applies where is decided by [`PathSelector`]s
//! evaluated against the [`Path`] of each node.
//!
//! Two documents that differ only in key order, in the order of sequences that
//! are not pinned by a no-sort policy, or in leaf detail removed by a
//! normalizer, canonicalize to equal [`CanonicalDocument`]s.
//!
#![deny(missing_docs)]

/// Recursive canonicalization walk.
pub mod canonicalizer;
/// Serde-loadable policy configuration.
pub mod config;
/// Fingerprints of canonical documents.
pub mod digest;
/// Document data model and its total order.
pub mod document;
/// Conversion of documents to JSON values.
pub mod encode;
/// Policy construction errors.
pub mod error;
/// Structured logging macros and event names.
pub mod macros;
/// Leaf normalizers and their resolution.
pub mod normalizer;
/// Node paths.
pub mod path;
/// Policy outcome and policy bundles.
pub mod policy;
/// Counters collected during canonicalization.
pub mod report;
/// Path selectors and their resolution.
pub mod selector;
/// Sequence sorters and their resolution.
pub mod sequence_sorter;

pub use canonicalizer::{CanonicalDocument, CanonicalizationResult, Canonicalizer};
pub use config::{NormalizerConfig, PolicyConfig, SelectorConfig, SorterConfig};
pub use digest::{fingerprint, Digest, DigestAlg, Fingerprint};
pub use document::{Document, Scalar};
pub use encode::{to_json_value, EncodeError, IsoDateEncoder, LeafEncoder};
pub use error::PolicyError;
pub use normalizer::{
    normalize, FloatRoundNormalizer, IdentityNormalizer, NormalizeContext, Normalizer,
    StrTodayDateNormalizer, TodayDateNormalizer, MAX_EFFECTIVE_PLACES,
};
pub use path::Path;
pub use policy::{Outcome, Policies};
pub use report::CanonicalizationReport;
pub use selector::{
    matches_any, selector_from_kind, AllSelector, AnyComponentSelector, BoxedSelector,
    LastComponentSelector, NegativeSelector, PathSelector, RegexSelector, SelectorArgs,
};
pub use sequence_sorter::{sort_sequence, DefaultSorter, NoSortSorter, SequenceSorter};
