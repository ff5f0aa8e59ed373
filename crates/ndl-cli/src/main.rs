//! ndl CLI - canonicalize, compare and diff nested JSON documents.
//!
//! Exit status: 0 on success or match, 1 when documents differ, 2 on error.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ndl_canonical::{log_op_end, log_op_error, log_op_start};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

mod commands;
mod error;
mod input;
mod logging;
mod output;

use commands::{canonicalize, compare, diff, fingerprint};
use logging::LogFormat;

#[derive(Parser)]
#[command(name = "ndl")]
#[command(about = "Structural comparison of nested JSON documents")]
struct Cli {
    /// Log output format (logs go to stderr; level from NDL_LOG or RUST_LOG)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that canonicalizes.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    /// JSON policy file (normalizers and sorters)
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Date substituted by the today-date normalizers (YYYY-MM-DD, default: local today)
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a document
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Print the canonicalization report to stderr
        #[arg(long)]
        report: bool,
    },
    /// Check two documents for equivalence
    Compare {
        /// Left JSON file
        left: String,
        /// Right JSON file
        right: String,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Show a side-by-side diff of two documents
    Diff {
        /// Left JSON file
        left: String,
        /// Right JSON file
        right: String,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Column width per side
        #[arg(long, default_value_t = ndl_diff::DEFAULT_WIDTH)]
        width: usize,
        /// Use bracket markers instead of colours
        #[arg(long)]
        plain: bool,
    },
    /// Print the digest of a document's canonical form
    Fingerprint {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Print the canonical bytes instead of the digest
        #[arg(long)]
        bytes: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Canonicalize { .. } => "canonicalize",
            Commands::Compare { .. } => "compare",
            Commands::Diff { .. } => "diff",
            Commands::Fingerprint { .. } => "fingerprint",
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, ndl_canonical::normalizer::ISO_DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let op = cli.command.name();
    log_op_start!(op);
    let started = Instant::now();

    let result = match cli.command {
        Commands::Canonicalize {
            input,
            policy,
            report,
        } => canonicalize::run(input, &policy, report),
        Commands::Compare {
            left,
            right,
            policy,
        } => compare::run(&left, &right, &policy),
        Commands::Diff {
            left,
            right,
            policy,
            width,
            plain,
        } => diff::run(&left, &right, &policy, width, plain),
        Commands::Fingerprint {
            input,
            policy,
            bytes,
        } => fingerprint::run(input, &policy, bytes),
    };

    let duration_ms = started.elapsed().as_millis() as u64;
    match result {
        Ok(matched) => {
            let code = if matched { 0 } else { 1 };
            log_op_end!(op, duration_ms = duration_ms, exit_code = code);
            ExitCode::from(code)
        }
        Err(e) => {
            log_op_error!(
                op,
                e,
                duration_ms = duration_ms,
                origin = e.origin().unwrap_or_default(),
            );
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
