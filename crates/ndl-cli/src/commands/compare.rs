//! Compare command implementation.

use ndl_diff::Differ;

use crate::error::CliError;
use crate::input::{load_policies, read_document};
use crate::output::verdict;
use crate::PolicyArgs;

pub fn run(left: &str, right: &str, args: &PolicyArgs) -> Result<bool, CliError> {
    let mut differ = Differ::new(load_policies(args.policy.as_deref())?);
    if let Some(today) = args.today {
        differ = differ.with_today(today);
    }
    let left = read_document(Some(left))?;
    let right = read_document(Some(right))?;

    let result = differ.compare(&left, &right);
    println!("{}", verdict(result.is_match()));
    Ok(result.is_match())
}
