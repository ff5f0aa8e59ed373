//! Command implementations. Each returns `Ok(false)` when documents differ.

pub mod canonicalize;
pub mod compare;
pub mod diff;
pub mod fingerprint;

use ndl_canonical::Canonicalizer;

use crate::error::CliError;
use crate::input::load_policies;
use crate::PolicyArgs;

fn canonicalizer(args: &PolicyArgs) -> Result<Canonicalizer, CliError> {
    Ok(Canonicalizer::new(load_policies(args.policy.as_deref())?))
}
