//! Logging initialization.
//!
//! Logs go to stderr so that stdout carries only command output.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives; `RUST_LOG` is the fallback.
pub const LOG_ENV: &str = "NDL_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

static INIT_ONCE: Once = Once::new();

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(format: LogFormat) {
    INIT_ONCE.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter());
        match format {
            LogFormat::Text => builder.init(),
            LogFormat::Json => builder.json().init(),
        }
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
