//! Diff command implementation.

use ndl_canonical::IsoDateEncoder;
use ndl_diff::{Differ, Formatter, Markers, PrettyJsonSerializer};

use crate::error::CliError;
use crate::input::{load_policies, read_document};
use crate::PolicyArgs;

pub fn run(
    left: &str,
    right: &str,
    args: &PolicyArgs,
    width: usize,
    plain: bool,
) -> Result<bool, CliError> {
    let markers = if plain { Markers::plain() } else { Markers::ansi() };
    let mut differ = Differ::new(load_policies(args.policy.as_deref())?)
        .with_serializer(PrettyJsonSerializer::new().with_encoder(IsoDateEncoder))
        .with_formatter(Formatter::new(width).with_markers(markers));
    if let Some(today) = args.today {
        differ = differ.with_today(today);
    }
    let left = read_document(Some(left))?;
    let right = read_document(Some(right))?;

    let result = differ.diff(&left, &right)?;
    println!("{}", result.support());
    Ok(result.is_match())
}
