//! Subcommands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use qokl_release_config::{
    ConfigFormat, ReleasePipelineConfig, find_and_load_config, load_config,
};

pub mod init;
pub mod plan;
pub mod show;
pub mod validate;

/// Output format argument.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum FormatArg {
    /// TOML document
    #[default]
    Toml,
    /// JSON document
    Json,
}

impl From<FormatArg> for ConfigFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => ConfigFormat::Toml,
            FormatArg::Json => ConfigFormat::Json,
        }
    }
}

/// Loads the configuration from `path`, or discovers it.
pub(crate) fn load(path: Option<&Path>) -> Result<ReleasePipelineConfig> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => find_and_load_config().context("failed to load configuration"),
    }
}
