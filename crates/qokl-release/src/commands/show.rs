//! Show command.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use qokl_release_config::to_string;

use super::FormatArg;

/// Arguments for the show command.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: FormatArg,
}

/// Runs the show command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ShowArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load(config_path)?;
    print!("{}", to_string(&config, args.format.into())?);
    Ok(())
}
