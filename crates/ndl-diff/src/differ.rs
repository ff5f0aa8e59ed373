use chrono::NaiveDate;
use ndl_canonical::{log_op_end, log_op_error, log_op_start};
use ndl_canonical::{CanonicalDocument, Canonicalizer, Document, NormalizeContext, Policies};
use std::time::Instant;

use crate::error::DiffError;
use crate::formatter::Formatter;
use crate::line_diff::{DiffLine, LcsLineDiffer, TextDiffer};
use crate::serializer::{DocumentSerializer, PrettyJsonSerializer};

/// Outcome of a comparison. Converts to `bool` for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    matched: bool,
    support: String,
    lines: Vec<DiffLine>,
}

impl DiffResult {
    /// True when the two documents are equivalent under the policies.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// Rendered side-by-side trace; empty for [`Differ::compare`].
    pub fn support(&self) -> &str {
        &self.support
    }

    /// Annotated lines behind the trace; empty for [`Differ::compare`].
    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    /// Number of lines that are not equal on both sides.
    pub fn changed_lines(&self) -> usize {
        self.lines.iter().filter(|line| line.is_change()).count()
    }
}

impl From<&DiffResult> for bool {
    fn from(result: &DiffResult) -> bool {
        result.matched
    }
}

impl From<DiffResult> for bool {
    fn from(result: DiffResult) -> bool {
        result.matched
    }
}

/// Compares two documents after canonicalizing both under one policy set.
///
/// ```
/// use ndl_canonical::{Document, Policies};
/// use ndl_diff::Differ;
/// use serde_json::json;
///
/// let differ = Differ::new(Policies::new());
/// let left = Document::from(json!({"l": [4, 3, 1, 2]}));
/// let right = Document::from(json!({"l": [1, 2, 3, 4]}));
/// assert!(differ.compare(&left, &right).is_match());
/// ```
#[derive(Debug)]
pub struct Differ {
    canonicalizer: Canonicalizer,
    serializer: Box<dyn DocumentSerializer>,
    text_differ: Box<dyn TextDiffer>,
    formatter: Formatter,
    today: Option<NaiveDate>,
}

impl Default for Differ {
    fn default() -> Self {
        Self::new(Policies::new())
    }
}

impl Differ {
    /// Differ with pretty JSON, the LCS line differ and the default formatter.
    pub fn new(policies: Policies) -> Self {
        Self {
            canonicalizer: Canonicalizer::new(policies),
            serializer: Box::new(PrettyJsonSerializer::new()),
            text_differ: Box::new(LcsLineDiffer),
            formatter: Formatter::default(),
            today: None,
        }
    }

    /// Replaces the serializer.
    pub fn with_serializer<S: DocumentSerializer + 'static>(mut self, serializer: S) -> Self {
        self.serializer = Box::new(serializer);
        self
    }

    /// Replaces the line differ.
    pub fn with_text_differ<T: TextDiffer + 'static>(mut self, text_differ: T) -> Self {
        self.text_differ = Box::new(text_differ);
        self
    }

    /// Replaces the formatter.
    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Pins "today" instead of reading the clock on each call.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Policies in use.
    pub fn policies(&self) -> &Policies {
        self.canonicalizer.policies()
    }

    /// Canonicalizes both sides, serializes them and diffs the text.
    ///
    /// Fails only when a canonical tree cannot be serialized, e.g. a date leaf
    /// with no encoder configured.
    pub fn diff(&self, left: &Document, right: &Document) -> Result<DiffResult, DiffError> {
        log_op_start!("diff");
        let started = Instant::now();

        match self.diff_inner(left, right) {
            Ok(result) => {
                log_op_end!(
                    "diff",
                    duration_ms = started.elapsed().as_millis() as u64,
                    matched = result.matched,
                    changed_lines = result.changed_lines(),
                );
                Ok(result)
            }
            Err(err) => {
                log_op_error!(
                    "diff",
                    err,
                    duration_ms = started.elapsed().as_millis() as u64,
                    path = err.path().unwrap_or_default(),
                );
                Err(err)
            }
        }
    }

    /// Canonicalizes both sides and checks them for structural equality.
    pub fn compare(&self, left: &Document, right: &Document) -> DiffResult {
        log_op_start!("compare");
        let started = Instant::now();

        let (left, right) = self.canonicalize_pair(left, right);
        let matched = left == right;

        log_op_end!(
            "compare",
            duration_ms = started.elapsed().as_millis() as u64,
            matched = matched,
        );
        DiffResult {
            matched,
            support: String::new(),
            lines: Vec::new(),
        }
    }

    fn diff_inner(&self, left: &Document, right: &Document) -> Result<DiffResult, DiffError> {
        let (left, right) = self.canonicalize_pair(left, right);
        let left_text = self.serializer.serialize(&left)?;
        let right_text = self.serializer.serialize(&right)?;

        let lines = self.text_differ.diff_lines(&left_text, &right_text);
        let matched = !lines.iter().any(DiffLine::is_change);
        let support = self.formatter.render(&lines);
        Ok(DiffResult {
            matched,
            support,
            lines,
        })
    }

    /// Both sides share one "today" so a midnight rollover cannot split them.
    fn canonicalize_pair(
        &self,
        left: &Document,
        right: &Document,
    ) -> (CanonicalDocument, CanonicalDocument) {
        let today = self.today.unwrap_or_else(|| NormalizeContext::now().today);
        (
            self.canonicalizer.canonicalize_on(left, today),
            self.canonicalizer.canonicalize_on(right, today),
        )
    }
}
