use chrono::NaiveDate;
use std::time::Instant;

use crate::document::Document;
use crate::normalizer::{self, NormalizeContext};
use crate::path::Path;
use crate::policy::Policies;
use crate::report::CanonicalizationReport;
use crate::sequence_sorter::{self, SortedBy};

/// A document in canonical form: keys in order, sequences in policy order,
/// leaves normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalDocument(Document);

impl CanonicalDocument {
    /// Borrows the canonical tree.
    pub fn as_document(&self) -> &Document {
        &self.0
    }

    /// Unwraps the canonical tree.
    pub fn into_document(self) -> Document {
        self.0
    }
}

impl AsRef<Document> for CanonicalDocument {
    fn as_ref(&self) -> &Document {
        &self.0
    }
}

/// Result of canonicalization.
#[derive(Debug)]
pub struct CanonicalizationResult {
    /// The canonical document.
    pub document: CanonicalDocument,
    /// What the walk did.
    pub report: CanonicalizationReport,
}

/// Canonicalizer parameterized by a policy set.
///
/// Canonicalization never fails on a finite document. A cyclic structure
/// cannot be expressed as a [`Document`]; depth is bounded only by the stack.
#[derive(Debug, Default)]
pub struct Canonicalizer {
    policies: Policies,
}

impl Canonicalizer {
    /// Creates a canonicalizer for the provided policies.
    pub fn new(policies: Policies) -> Self {
        Self { policies }
    }

    /// Policies in use.
    pub fn policies(&self) -> &Policies {
        &self.policies
    }

    /// Canonicalizes `document`, reading today's date once for the whole walk.
    pub fn canonicalize(&self, document: &Document) -> CanonicalDocument {
        self.canonicalize_with_report(document).document
    }

    /// Canonicalizes `document` with an explicit "today".
    pub fn canonicalize_on(&self, document: &Document, today: NaiveDate) -> CanonicalDocument {
        self.canonicalize_with_report_on(document, today).document
    }

    /// Canonicalizes `document` and reports what was done.
    pub fn canonicalize_with_report(&self, document: &Document) -> CanonicalizationResult {
        self.run(document, &NormalizeContext::now())
    }

    /// Canonicalizes `document` with an explicit "today" and reports what was done.
    pub fn canonicalize_with_report_on(
        &self,
        document: &Document,
        today: NaiveDate,
    ) -> CanonicalizationResult {
        self.run(document, &NormalizeContext::new(today))
    }

    fn run(&self, document: &Document, ctx: &NormalizeContext) -> CanonicalizationResult {
        crate::log_op_start!("canonicalize", category = document.category());
        let started = Instant::now();

        let mut report = CanonicalizationReport::default();
        let canonical = self.walk(document, &Path::root(), ctx, &mut report);

        crate::log_op_end!(
            "canonicalize",
            duration_ms = started.elapsed().as_millis() as u64,
            nodes = report.nodes(),
            leaves_normalized = report.leaves_normalized,
        );
        CanonicalizationResult {
            document: CanonicalDocument(canonical),
            report,
        }
    }

    /// Depth-first, post-order rebuild of `document`.
    fn walk(
        &self,
        document: &Document,
        path: &Path,
        ctx: &NormalizeContext,
        report: &mut CanonicalizationReport,
    ) -> Document {
        match document {
            Document::Mapping(entries) => {
                report.mappings += 1;
                Document::Mapping(
                    entries
                        .iter()
                        .map(|(key, child)| {
                            (key.clone(), self.walk(child, &path.child(key), ctx, report))
                        })
                        .collect(),
                )
            }
            Document::Sequence(elements) => {
                report.sequences += 1;
                // Indices label the original positions; they do not survive sorting.
                let mut children: Vec<Document> = elements
                    .iter()
                    .enumerate()
                    .map(|(idx, child)| self.walk(child, &path.index(idx), ctx, report))
                    .collect();
                let (sorted_by, declines) =
                    sequence_sorter::resolve(&mut children, path, self.policies.sorters());
                report.sorter_declines += declines;
                if let SortedBy::Policy(name) = sorted_by {
                    report.sequences_by_policy += 1;
                    tracing::trace!(path = %path, sorter = name, "sequence ordered by policy");
                }
                Document::Sequence(children)
            }
            Document::Scalar(scalar) => {
                report.leaves += 1;
                let resolution =
                    normalizer::resolve(scalar, path, self.policies.normalizers(), ctx);
                report.normalizer_declines += resolution.declines;
                match resolution.value {
                    Some(normalized) => {
                        report.leaves_normalized += 1;
                        Document::Scalar(normalized)
                    }
                    None => Document::Scalar(scalar.clone()),
                }
            }
        }
    }
}
