use crate::normalizer::Normalizer;
use crate::sequence_sorter::SequenceSorter;

/// Result of offering a value to a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = ()> {
    /// The policy handled the value.
    Applied(T),
    /// The policy does not handle this value; try the next candidate.
    Declined,
}

impl<T> Outcome<T> {
    /// True for [`Outcome::Applied`].
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    /// Converts to an `Option`, discarding the decline.
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Declined => None,
        }
    }
}

/// Ordered candidate lists of normalizers and sequence sorters.
///
/// The empty set sorts every sequence with the default order and leaves every
/// leaf unchanged. Policies are stateless, so one set may serve any number of
/// calls, from any number of threads.
#[derive(Debug, Default)]
pub struct Policies {
    normalizers: Vec<Box<dyn Normalizer>>,
    sorters: Vec<Box<dyn SequenceSorter>>,
}

impl Policies {
    /// Empty policy set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a normalizer; earlier normalizers are tried first.
    pub fn with_normalizer<N: Normalizer + 'static>(mut self, normalizer: N) -> Self {
        self.normalizers.push(Box::new(normalizer));
        self
    }

    /// Appends a sequence sorter; earlier sorters are tried first.
    pub fn with_sorter<S: SequenceSorter + 'static>(mut self, sorter: S) -> Self {
        self.sorters.push(Box::new(sorter));
        self
    }

    /// Appends an already boxed normalizer.
    pub fn push_normalizer(&mut self, normalizer: Box<dyn Normalizer>) {
        self.normalizers.push(normalizer);
    }

    /// Appends an already boxed sequence sorter.
    pub fn push_sorter(&mut self, sorter: Box<dyn SequenceSorter>) {
        self.sorters.push(sorter);
    }

    /// Normalizer candidates in evaluation order.
    pub fn normalizers(&self) -> &[Box<dyn Normalizer>] {
        &self.normalizers
    }

    /// Sorter candidates in evaluation order.
    pub fn sorters(&self) -> &[Box<dyn SequenceSorter>] {
        &self.sorters
    }
}

/// Adds selector builder methods to policy structs holding a `selectors` list.
macro_rules! selector_builders {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Adds `selector` to the list deciding where this policy applies.
                pub fn with_selector<S>(mut self, selector: S) -> Self
                where
                    S: $crate::selector::PathSelector + 'static,
                {
                    self.selectors.push(Box::new(selector));
                    self
                }

                /// Replaces the selector list. An empty list applies everywhere.
                pub fn with_selectors(
                    mut self,
                    selectors: Vec<$crate::selector::BoxedSelector>,
                ) -> Self {
                    self.selectors = selectors;
                    self
                }
            }
        )*
    };
}

pub(crate) use selector_builders;
