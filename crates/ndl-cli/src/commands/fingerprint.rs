//! Fingerprint command implementation.

use ndl_canonical::{fingerprint, IsoDateEncoder, NormalizeContext};

use crate::error::CliError;
use crate::input::read_document;
use crate::PolicyArgs;

pub fn run(input: Option<String>, args: &PolicyArgs, bytes: bool) -> Result<bool, CliError> {
    let canonicalizer = super::canonicalizer(args)?;
    let document = read_document(input.as_deref())?;

    let today = args.today.unwrap_or_else(|| NormalizeContext::now().today);
    let canonical = canonicalizer.canonicalize_on(&document, today);
    let fp = fingerprint(&canonical, Some(&IsoDateEncoder))?;

    if bytes {
        println!("{}", String::from_utf8_lossy(&fp.bytes));
    } else {
        println!("{}", serde_json::to_string(&fp.digest)?);
    }
    Ok(true)
}
