use thiserror::Error;

/// Errors raised while building selectors and policies.
///
/// These are configuration errors: they surface when policies are
/// constructed, before any document is canonicalized.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Selector kind string is not one of the built-in kinds.
    #[error("unknown selector kind '{0}'")]
    UnknownSelector(String),
    /// Normalizer kind string is not one of the built-in kinds.
    #[error("unknown normalizer kind '{0}'")]
    UnknownNormalizer(String),
    /// Sorter kind string is not one of the built-in kinds.
    #[error("unknown sorter kind '{0}'")]
    UnknownSorter(String),
    /// A required argument for the given kind was not supplied.
    #[error("{kind} requires argument '{argument}'")]
    MissingArgument {
        /// Kind being constructed.
        kind: String,
        /// Name of the missing argument.
        argument: &'static str,
    },
    /// Regex selector pattern failed to compile.
    #[error("invalid selector pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// Policy file could not be parsed.
    #[error("invalid policy configuration: {0}")]
    Config(#[from] serde_json::Error),
}
