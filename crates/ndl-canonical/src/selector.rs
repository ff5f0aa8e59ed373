//! Path selectors decide whether a policy applies at a node.
//!
//! Policies hold an ordered list of selectors. An empty list applies
//! everywhere; otherwise the policy applies when any selector in the list
//! matches, checked in declaration order.

use crate::error::PolicyError;
use crate::path::Path;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// Predicate over a [`Path`].
pub trait PathSelector: fmt::Debug + Send + Sync {
    /// Returns true if the path is selected.
    fn matches(&self, path: &Path) -> bool;

    /// Boxes the selector for use in a selector list.
    fn boxed(self) -> BoxedSelector
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Owned, type-erased selector.
pub type BoxedSelector = Box<dyn PathSelector>;

/// True if `selectors` is empty or any of them matches `path`.
pub fn matches_any(path: &Path, selectors: &[BoxedSelector]) -> bool {
    selectors.is_empty() || selectors.iter().any(|s| s.matches(path))
}

/// Selects every path, including the root.
#[derive(Debug, Clone, Default)]
pub struct AllSelector;

impl PathSelector for AllSelector {
    fn matches(&self, _path: &Path) -> bool {
        true
    }
}

/// Selects paths whose final component is one of a set of names.
#[derive(Debug, Clone)]
pub struct LastComponentSelector {
    names: BTreeSet<String>,
}

impl LastComponentSelector {
    /// Creates a selector for the given component names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathSelector for LastComponentSelector {
    fn matches(&self, path: &Path) -> bool {
        path.last().is_some_and(|last| self.names.contains(last))
    }
}

/// Selects paths with at least one component in a set of names.
#[derive(Debug, Clone)]
pub struct AnyComponentSelector {
    names: BTreeSet<String>,
}

impl AnyComponentSelector {
    /// Creates a selector for the given component names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl PathSelector for AnyComponentSelector {
    fn matches(&self, path: &Path) -> bool {
        path.components().iter().any(|c| self.names.contains(c))
    }
}

/// Selects paths whose `/`-joined form contains a match for a regex.
#[derive(Debug, Clone)]
pub struct RegexSelector {
    regex: Regex,
}

impl RegexSelector {
    /// Compiles `pattern`; the search is unanchored.
    pub fn new(pattern: &str) -> Result<Self, PolicyError> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }
}

impl PathSelector for RegexSelector {
    fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&path.joined())
    }
}

/// Inverts another selector.
#[derive(Debug)]
pub struct NegativeSelector {
    inner: BoxedSelector,
}

impl NegativeSelector {
    /// Selects exactly the paths `inner` does not.
    pub fn new(inner: BoxedSelector) -> Self {
        Self { inner }
    }
}

impl PathSelector for NegativeSelector {
    fn matches(&self, path: &Path) -> bool {
        !self.inner.matches(path)
    }
}

/// Arguments for [`selector_from_kind`]. Each kind reads only what it needs.
#[derive(Debug, Default)]
pub struct SelectorArgs {
    /// Component names for `last_component` and `any_component`.
    pub names: Vec<String>,
    /// Pattern for `regex`.
    pub pattern: Option<String>,
    /// Wrapped selector for `not`.
    pub inner: Option<BoxedSelector>,
}

/// Builds a selector from its kind string.
///
/// Known kinds: `all`, `last_component`, `any_component`, `regex`, `not`.
pub fn selector_from_kind(kind: &str, args: SelectorArgs) -> Result<BoxedSelector, PolicyError> {
    match kind {
        "all" => Ok(AllSelector.boxed()),
        "last_component" => Ok(LastComponentSelector::new(args.names).boxed()),
        "any_component" => Ok(AnyComponentSelector::new(args.names).boxed()),
        "regex" => {
            let pattern = args.pattern.ok_or_else(|| PolicyError::MissingArgument {
                kind: kind.to_string(),
                argument: "pattern",
            })?;
            Ok(RegexSelector::new(&pattern)?.boxed())
        }
        "not" => {
            let inner = args.inner.ok_or_else(|| PolicyError::MissingArgument {
                kind: kind.to_string(),
                argument: "selector",
            })?;
            Ok(NegativeSelector::new(inner).boxed())
        }
        other => Err(PolicyError::UnknownSelector(other.to_string())),
    }
}
