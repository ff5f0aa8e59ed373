//! Canonicalize command implementation.

use ndl_canonical::NormalizeContext;

use crate::error::CliError;
use crate::input::read_document;
use crate::output::format_document;
use crate::PolicyArgs;

pub fn run(input: Option<String>, args: &PolicyArgs, report: bool) -> Result<bool, CliError> {
    let canonicalizer = super::canonicalizer(args)?;
    let document = read_document(input.as_deref())?;

    let today = args.today.unwrap_or_else(|| NormalizeContext::now().today);
    let result = canonicalizer.canonicalize_with_report_on(&document, today);

    println!("{}", format_document(&result.document)?);
    if report {
        eprintln!("{}", serde_json::to_string(&result.report)?);
    }
    Ok(true)
}
