//! Leaf normalizers.
//!
//! Normalizers rewrite scalar leaves before comparison. For each leaf the
//! candidates are tried in order; a candidate whose selectors match the path
//! may still decline the value (wrong kind, unparsable string), in which case
//! the next candidate is tried. The first applied result wins. A leaf nobody
//! handles is kept as is.

use crate::document::Scalar;
use crate::path::Path;
use crate::policy::{selector_builders, Outcome};
use crate::selector::{matches_any, BoxedSelector};
use chrono::{Local, NaiveDate};
use std::fmt;

/// Calendar format recognised and produced by [`StrTodayDateNormalizer`].
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Values shared by all normalizers during one canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeContext {
    /// The date substituted by the today-date normalizers.
    pub today: NaiveDate,
}

impl NormalizeContext {
    /// Context with an explicit "today".
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context snapshotting the local calendar date now.
    pub fn now() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }
}

/// Leaf transform guarded by path selectors.
pub trait Normalizer: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Selectors deciding where this normalizer applies; empty means everywhere.
    fn selectors(&self) -> &[BoxedSelector];

    /// Transforms `value`, or declines if it is not a value this normalizer handles.
    fn normalize(&self, value: &Scalar, ctx: &NormalizeContext) -> Outcome<Scalar>;
}

/// Outcome of running a leaf through a candidate list.
#[derive(Debug)]
pub(crate) struct Resolution {
    pub(crate) value: Option<Scalar>,
    pub(crate) declines: u64,
}

pub(crate) fn resolve(
    value: &Scalar,
    path: &Path,
    normalizers: &[Box<dyn Normalizer>],
    ctx: &NormalizeContext,
) -> Resolution {
    let mut declines = 0;
    for normalizer in normalizers {
        if !matches_any(path, normalizer.selectors()) {
            continue;
        }
        match normalizer.normalize(value, ctx) {
            Outcome::Applied(normalized) => {
                return Resolution {
                    value: Some(normalized),
                    declines,
                }
            }
            Outcome::Declined => {
                declines += 1;
                tracing::trace!(
                    path = %path,
                    normalizer = normalizer.name(),
                    kind = value.kind(),
                    "normalizer declined"
                );
            }
        }
    }
    Resolution {
        value: None,
        declines,
    }
}

/// Normalizes one leaf at `path` with the first selected normalizer that applies.
pub fn normalize(
    value: &Scalar,
    path: &Path,
    normalizers: &[Box<dyn Normalizer>],
    ctx: &NormalizeContext,
) -> Scalar {
    resolve(value, path, normalizers, ctx)
        .value
        .unwrap_or_else(|| value.clone())
}

/// Accepts every value unchanged. Placed in a list, it stops the chain.
#[derive(Debug, Default)]
pub struct IdentityNormalizer {
    selectors: Vec<BoxedSelector>,
}

impl IdentityNormalizer {
    /// Identity normalizer applying everywhere.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Normalizer for IdentityNormalizer {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn normalize(&self, value: &Scalar, _ctx: &NormalizeContext) -> Outcome<Scalar> {
        Outcome::Applied(value.clone())
    }
}

/// Rounds float leaves to a number of decimal places.
///
/// Rounding is to the nearest representable decimal of the exact binary
/// value, ties to even. Integers, non-finite floats and non-numbers are
/// declined.
#[derive(Debug)]
pub struct FloatRoundNormalizer {
    places: u32,
    selectors: Vec<BoxedSelector>,
}

impl FloatRoundNormalizer {
    /// Rounds to `places` decimal places.
    pub fn new(places: u32) -> Self {
        Self {
            places,
            selectors: Vec::new(),
        }
    }

    /// Configured number of decimal places.
    pub fn places(&self) -> u32 {
        self.places
    }
}

/// Decimal places beyond which rounding cannot change an `f64`: every finite
/// value is a multiple of 2^-1074 and so has at most this many decimals.
pub const MAX_EFFECTIVE_PLACES: u32 = 1074;

/// Rounds through decimal formatting, which is exact for every `f64`.
pub(crate) fn round_to_places(value: f64, places: u32) -> f64 {
    if places >= MAX_EFFECTIVE_PLACES {
        return value;
    }
    format!("{:.*}", places as usize, value)
        .parse()
        .unwrap_or(value)
}

impl Normalizer for FloatRoundNormalizer {
    fn name(&self) -> &'static str {
        "float_round"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn normalize(&self, value: &Scalar, _ctx: &NormalizeContext) -> Outcome<Scalar> {
        match value {
            Scalar::Float(f) if f.is_finite() => {
                Outcome::Applied(Scalar::Float(round_to_places(*f, self.places)))
            }
            _ => Outcome::Declined,
        }
    }
}

/// Replaces date and date-time leaves with today's date.
#[derive(Debug, Default)]
pub struct TodayDateNormalizer {
    selectors: Vec<BoxedSelector>,
}

impl TodayDateNormalizer {
    /// Today-date normalizer applying everywhere.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Normalizer for TodayDateNormalizer {
    fn name(&self) -> &'static str {
        "today_date"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn normalize(&self, value: &Scalar, ctx: &NormalizeContext) -> Outcome<Scalar> {
        match value {
            Scalar::Date(_) | Scalar::DateTime(_) => Outcome::Applied(Scalar::Date(ctx.today)),
            _ => Outcome::Declined,
        }
    }
}

/// Replaces `YYYY-MM-DD` string leaves with today's date in the same format.
#[derive(Debug, Default)]
pub struct StrTodayDateNormalizer {
    selectors: Vec<BoxedSelector>,
}

impl StrTodayDateNormalizer {
    /// String today-date normalizer applying everywhere.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Normalizer for StrTodayDateNormalizer {
    fn name(&self) -> &'static str {
        "str_today_date"
    }

    fn selectors(&self) -> &[BoxedSelector] {
        &self.selectors
    }

    fn normalize(&self, value: &Scalar, ctx: &NormalizeContext) -> Outcome<Scalar> {
        match value {
            Scalar::String(s) if NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).is_ok() => {
                Outcome::Applied(Scalar::String(
                    ctx.today.format(ISO_DATE_FORMAT).to_string(),
                ))
            }
            _ => Outcome::Declined,
        }
    }
}

selector_builders!(
    IdentityNormalizer,
    FloatRoundNormalizer,
    TodayDateNormalizer,
    StrTodayDateNormalizer,
);
