//! Sequence sorters.
//!
//! Sequences are sorted after their elements have been canonicalized. The
//! first selected sorter that does not decline decides the order; when none
//! does, the elements are put in the default [`Document`] order.

use crate::document::Document;
use crate::path::Path;
use crate::policy::{selector_builders, Outcome};
use crate::selector::{matches_any, BoxedSelector};
use std::fmt;

/// Reordering policy for sequences, guarded by path selectors.
pub trait SequenceSorter: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Selectors deciding where this sorter applies; empty means everywhere.
    fn selectors(&self) -> &[BoxedSelector];

    /// Reorders `elements` in place, or declines and leaves them untouched.
    fn sort(&self, elements: &mut [Document]) -> Outcome;
}

/// Which policy produced a sequence's final order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortedBy {
    Policy(&'static str),
    Default,
}

/// Applies the sorter list to `elements` and reports what decided the order.
pub(crate) fn resolve(
    elements: &mut [Document],
    path: &Path,
    sorters: &[Box<dyn SequenceSorter>],
) -> (SortedBy, u64) {
    let mut declines = 0;
    for sorter in sorters {
        if !matches_any(path, sorter.selectors()) {
            continue;
        }
        match sorter.sort(elements) {
            Outcome::Applied(()) => return (SortedBy::Policy(sorter.name()), declines),
            Outcome::Declined => {
                declines += 1;
                tracing::trace!(path = %path, sorter = sorter.name(), "sorter declined");
            }
        }
    }
    elements.sort();
    (SortedBy::Default, declines)
}

/// Orders already canonicalized `elements` found at `path`.
pub fn sort_sequence(
    mut elements: Vec<Document>,
    path: &Path,
    sorters: &[Box<dyn SequenceSorter>],
) -> Vec<Document> {
    resolve(&mut elements, path, sorters);
    elements
}

/// Sorts into the default document order.
#[derive(Debug, Default)]
pub struct DefaultSorter {
    selectors: Vec<BoxedSelector>,
}

impl DefaultSorter {
    /// Default sorter applying everywhere.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceSorter for DefaultSorter {
    fn name(&self) -> &'static str {
        "default"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn sort(&self, elements: &mut [Document]) -> Outcome {
        elements.sort();
        Outcome::Applied(())
    }
}

/// Keeps the original element order.
#[derive(Debug, Default)]
pub struct NoSortSorter {
    selectors: Vec<BoxedSelector>,
}

impl NoSortSorter {
    /// No-sort sorter applying everywhere.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SequenceSorter for NoSortSorter {
    fn name(&self) -> &'static str {
        "no_sort"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn sort(&self, _elements: &mut [Document]) -> Outcome {
        Outcome::Applied(())
    }
}

selector_builders!(DefaultSorter, NoSortSorter);
