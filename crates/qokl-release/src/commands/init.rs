//! Initialize command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use qokl_release_config::{CONFIG_FILE_NAME, ConfigFormat, Preset, to_string};
use tracing::info;

use super::FormatArg;

/// JSON configuration file name.
const JSON_CONFIG_FILE_NAME: &str = ".releaserc.json";

/// Starter pipeline style.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StyleArg {
    /// `bash build-release.sh`, with a labelled linux archive
    #[default]
    Bash,
    /// `./build-release.sh`, bare asset globs
    Exec,
}

impl From<StyleArg> for Preset {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Bash => Preset::Bash,
            StyleArg::Exec => Preset::Exec,
        }
    }
}

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Starter pipeline style
    #[arg(short, long, value_enum, default_value_t)]
    pub style: StyleArg,

    /// File format (ignored when --config names the file)
    #[arg(long, value_enum, default_value_t)]
    pub format: FormatArg,
}

/// Runs the init command.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: InitArgs, config_path: Option<&Path>) -> Result<()> {
    let path = config_path.map_or_else(|| default_path(args.format), Path::to_path_buf);
    let format = if config_path.is_some() {
        ConfigFormat::from_path(&path)
    } else {
        args.format.into()
    };

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let preset = Preset::from(args.style);
    let content = to_string(&preset.config(), format)?;
    fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), ?preset, "configuration written");
    println!("Created {}", path.display());
    Ok(())
}

fn default_path(format: FormatArg) -> PathBuf {
    match format {
        FormatArg::Toml => PathBuf::from(CONFIG_FILE_NAME),
        FormatArg::Json => PathBuf::from(JSON_CONFIG_FILE_NAME),
    }
}
