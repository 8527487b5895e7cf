use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while classifying or materializing a release.
#[derive(Debug, Error)]
pub enum PaddockError {
    /// The basename is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// No entry in the family dispatcher matched the filename.
    #[error("no sport family matches {input:?}")]
    UnknownFamily {
        /// The basename that could not be dispatched.
        input: String,
    },

    /// A family parser could not recover a mandatory field.
    #[error("failed to parse {input:?}: {reason}")]
    ParseFailed {
        /// The basename that could not be parsed.
        input: String,
        /// Which field or layout was missing.
        reason: String,
    },

    /// The raw session tokens did not map onto any known session slot.
    #[error("unresolved session in {input:?} (tokens: {tokens:?})")]
    UnresolvedSession {
        /// The basename being classified.
        input: String,
        /// The session tokens that were tried.
        tokens: Vec<String>,
    },

    /// Both the hardlink and the copy fallback failed.
    #[error("failed to materialize {destination}: {source}")]
    Materialize {
        /// The destination that could not be created.
        destination: PathBuf,
        /// The error reported by the copy fallback.
        #[source]
        source: std::io::Error,
    },

    /// Startup configuration is unusable (missing or unwritable roots).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Filesystem error outside of materialization.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

impl PaddockError {
    pub(crate) fn parse_failed(input: &str, reason: impl Into<String>) -> Self {
        Self::ParseFailed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Paddock operations.
pub type Result<T> = std::result::Result<T, PaddockError>;
