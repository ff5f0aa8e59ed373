use serde::{Deserialize, Serialize};

/// Counters describing what one canonicalization did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalizationReport {
    /// Mapping nodes rebuilt in key order.
    pub mappings: u64,
    /// Sequence nodes visited.
    pub sequences: u64,
    /// Sequences ordered by a selected sorter rather than the default order.
    pub sequences_by_policy: u64,
    /// Scalar leaves visited.
    pub leaves: u64,
    /// Leaves rewritten by a normalizer (including identity).
    pub leaves_normalized: u64,
    /// Selected normalizers that declined a leaf.
    pub normalizer_declines: u64,
    /// Selected sorters that declined a sequence.
    pub sorter_declines: u64,
}

impl CanonicalizationReport {
    /// Total number of nodes visited.
    pub fn nodes(&self) -> u64 {
        self.mappings + self.sequences + self.leaves
    }
}
