//! Configuration error types.

use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    NotFound(std::path::PathBuf),

    /// Invalid TOML syntax.
    #[error("invalid TOML: {0}")]
    InvalidToml(#[from] toml::de::Error),

    /// TOML serialization failed.
    #[error("failed to serialize TOML: {0}")]
    SerializeToml(#[from] toml::ser::Error),

    /// Invalid JSON syntax, or JSON serialization failed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No release branch declared.
    #[error("invalid configuration: `branches` must list at least one branch")]
    NoBranches,

    /// A branch name is empty.
    #[error("invalid configuration: branch #{index} has an empty name")]
    EmptyBranchName {
        /// Position of the branch in `branches`.
        index: usize,
    },

    /// The same branch is declared twice.
    #[error("invalid configuration: branch `{0}` is declared more than once")]
    DuplicateBranch(String),

    /// No plugin declared, so no release action is possible.
    #[error("invalid configuration: `plugins` must list at least one plugin")]
    EmptyPipeline,

    /// A plugin name is empty.
    #[error("invalid configuration: plugin #{index} has an empty name")]
    EmptyPluginName {
        /// Position of the plugin in `plugins`.
        index: usize,
    },

    /// A plugin option has the wrong shape.
    #[error("invalid option `{option}` for plugin `{plugin}`: {reason}")]
    InvalidOption {
        /// Plugin name.
        plugin: String,
        /// Option name.
        option: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A plugin is missing an option it cannot work without.
    #[error("plugin `{plugin}` requires {expected}")]
    MissingOption {
        /// Plugin name.
        plugin: String,
        /// Human readable description of the expected option.
        expected: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
