//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] qokl_release_config::ConfigError),

    /// A template references a variable the context cannot provide.
    #[error("unknown template variable `${{{0}}}`")]
    UnknownVariable(String),

    /// The branch is not listed in `branches`.
    #[error("branch `{branch}` is not a release branch (allowed: {})", allowed.join(", "))]
    IneligibleBranch {
        /// Branch being released from.
        branch: String,
        /// Configured release branches.
        allowed: Vec<String>,
    },

    /// An asset glob is malformed.
    #[error("invalid asset pattern `{pattern}`")]
    GlobPattern {
        /// The rendered pattern.
        pattern: String,
        /// Underlying parse error.
        #[source]
        source: glob::PatternError,
    },

    /// A matched path could not be read.
    #[error("failed to read asset: {0}")]
    GlobIteration(#[from] glob::GlobError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
