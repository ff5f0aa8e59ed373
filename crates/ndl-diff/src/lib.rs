//! Equivalence checks and readable diffs of nested documents.
//!
//! A [`Differ`] canonicalizes both documents under the same
//! [`Policies`](ndl_canonical::Policies), renders them with a
//! [`DocumentSerializer`], and diffs the text with a [`TextDiffer`]. The
//! documents match when no line differs. The side-by-side trace built by the
//! [`Formatter`] is for people and has no bearing on the match.
//!
//! [`Differ::compare`] skips the text stages and compares the canonical trees
//! directly.

#![deny(missing_docs)]

/// Comparison entry points and results.
pub mod differ;
/// Diff errors.
pub mod error;
/// Side-by-side trace rendering.
pub mod formatter;
/// Line and intraline diffing.
pub mod line_diff;
mod myers;
/// Canonical document serializers.
pub mod serializer;

pub use differ::{DiffResult, Differ};
pub use error::DiffError;
pub use formatter::{Formatter, Markers, DEFAULT_WIDTH};
pub use line_diff::{
    DiffLine, LcsLineDiffer, LineTag, Mark, Span, TextDiffer, MAX_INTRALINE_CHARS,
};
pub use serializer::{DocumentSerializer, PrettyJsonSerializer};
