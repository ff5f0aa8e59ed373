//! Policy configuration loadable from JSON.
//!
//! ```json
//! {
//!   "normalizers": [
//!     {"kind": "float_round", "places": 2,
//!      "selectors": [{"kind": "last_component", "names": ["price"]}]}
//!   ],
//!   "sorters": [
//!     {"kind": "no_sort", "selectors": [{"kind": "regex", "pattern": "^steps"}]}
//!   ]
//! }
//! ```
//!
//! Kinds are resolved by [`PolicyConfig::build`]; an unknown kind or a missing
//! argument is reported there, before anything is canonicalized.

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use crate::normalizer::{
    FloatRoundNormalizer, IdentityNormalizer, Normalizer, StrTodayDateNormalizer,
    TodayDateNormalizer,
};
use crate::policy::Policies;
use crate::selector::{selector_from_kind, BoxedSelector, SelectorArgs};
use crate::sequence_sorter::{DefaultSorter, NoSortSorter, SequenceSorter};

/// Selector description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectorConfig {
    /// `all`, `last_component`, `any_component`, `regex` or `not`.
    pub kind: String,
    /// Component names for the component selectors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    /// Pattern for `regex`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Wrapped selector for `not`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Box<SelectorConfig>>,
}

impl SelectorConfig {
    /// Builds the described selector.
    pub fn build(&self) -> Result<BoxedSelector, PolicyError> {
        let inner = self.selector.as_deref().map(SelectorConfig::build).transpose()?;
        selector_from_kind(
            &self.kind,
            SelectorArgs {
                names: self.names.clone(),
                pattern: self.pattern.clone(),
                inner,
            },
        )
    }
}

fn build_selectors(configs: &[SelectorConfig]) -> Result<Vec<BoxedSelector>, PolicyError> {
    configs.iter().map(SelectorConfig::build).collect()
}

/// Normalizer description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NormalizerConfig {
    /// `identity`, `float_round`, `today_date` or `str_today_date`.
    pub kind: String,
    /// Decimal places for `float_round`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places: Option<u32>,
    /// Where the normalizer applies; empty means everywhere.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<SelectorConfig>,
}

impl NormalizerConfig {
    /// Builds the described normalizer.
    pub fn build(&self) -> Result<Box<dyn Normalizer>, PolicyError> {
        let selectors = build_selectors(&self.selectors)?;
        let normalizer: Box<dyn Normalizer> = match self.kind.as_str() {
            "identity" => Box::new(IdentityNormalizer::new().with_selectors(selectors)),
            "float_round" => {
                let places = self.places.ok_or_else(|| PolicyError::MissingArgument {
                    kind: self.kind.clone(),
                    argument: "places",
                })?;
                Box::new(FloatRoundNormalizer::new(places).with_selectors(selectors))
            }
            "today_date" => Box::new(TodayDateNormalizer::new().with_selectors(selectors)),
            "str_today_date" => Box::new(StrTodayDateNormalizer::new().with_selectors(selectors)),
            other => return Err(PolicyError::UnknownNormalizer(other.to_string())),
        };
        Ok(normalizer)
    }
}

/// Sequence sorter description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SorterConfig {
    /// `default` or `no_sort`.
    pub kind: String,
    /// Where the sorter applies; empty means everywhere.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<SelectorConfig>,
}

impl SorterConfig {
    /// Builds the described sorter.
    pub fn build(&self) -> Result<Box<dyn SequenceSorter>, PolicyError> {
        let selectors = build_selectors(&self.selectors)?;
        match self.kind.as_str() {
            "default" => Ok(Box::new(DefaultSorter::new().with_selectors(selectors))),
            "no_sort" => Ok(Box::new(NoSortSorter::new().with_selectors(selectors))),
            other => Err(PolicyError::UnknownSorter(other.to_string())),
        }
    }
}

/// Complete policy set description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Normalizers in evaluation order.
    #[serde(default)]
    pub normalizers: Vec<NormalizerConfig>,
    /// Sequence sorters in evaluation order.
    #[serde(default)]
    pub sorters: Vec<SorterConfig>,
}

impl PolicyConfig {
    /// Parses a JSON policy document.
    pub fn from_json(text: &str) -> Result<Self, PolicyError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the described policies.
    pub fn build(&self) -> Result<Policies, PolicyError> {
        let mut policies = Policies::new();
        for normalizer in &self.normalizers {
            policies.push_normalizer(normalizer.build()?);
        }
        for sorter in &self.sorters {
            policies.push_sorter(sorter.build()?);
        }
        Ok(policies)
    }
}
