//! Plan command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use qokl_release_config::{ASSETS_OPTION, AssetSpec, OptionValue, PluginKind};
use qokl_release_core::{DEFAULT_TAG_FORMAT, PlannedStep, ReleaseContext, ReleasePlan};
use semver::Version;

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Version computed for the next release
    #[arg(short = 'n', long)]
    pub next_version: Version,

    /// Branch being released (defaults to the first configured branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Version of the previous release
    #[arg(long)]
    pub last_version: Option<Version>,

    /// Distribution channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Git tag format
    #[arg(long, default_value = DEFAULT_TAG_FORMAT)]
    pub tag_format: String,

    /// Expand asset globs against this directory
    #[arg(long, value_name = "DIR")]
    pub resolve_assets: Option<PathBuf>,
}

/// Runs the plan command.
pub fn run(args: PlanArgs, config_path: Option<&Path>) -> Result<()> {
    let config = super::load(config_path)?;

    let branch = match args.branch {
        Some(branch) => branch,
        None => config
            .branches
            .first()
            .cloned()
            .context("no release branch configured")?,
    };

    let mut ctx = ReleaseContext::new(args.next_version, branch).with_tag_format(args.tag_format);
    if let Some(last) = args.last_version {
        ctx = ctx.with_last_release(last);
    }
    if let Some(channel) = args.channel {
        ctx = ctx.with_channel(channel);
    }

    let plan = ReleasePlan::build(&config, &ctx)?;

    println!(
        "Release {} from {} (tag {})\n",
        ctx.next_version,
        ctx.branch,
        ctx.tag_for(&ctx.next_version)
    );
    for (index, step) in plan.steps().iter().enumerate() {
        print_step(index + 1, step)?;
    }

    if let Some(dir) = args.resolve_assets {
        println!("\nAssets:");
        let resolved = plan
            .resolve_assets(&dir)
            .with_context(|| format!("failed to resolve assets in {}", dir.display()))?;
        if resolved.is_empty() {
            println!("  no files matched");
        }
        for asset in resolved {
            match asset.label {
                Some(ref label) => println!("  {} ({label})", asset.path.display()),
                None => println!("  {}", asset.path.display()),
            }
        }
    }

    Ok(())
}

fn print_step(position: usize, step: &PlannedStep) -> Result<()> {
    println!("{position}. [{}] {}", step.kind, step.name());

    for (key, value) in step.options() {
        if step.kind == PluginKind::GitHub && key == ASSETS_OPTION {
            for asset in step.invocation.assets()? {
                println!("     asset {}", describe_asset(&asset));
            }
        } else {
            println!("     {key} = {}", format_value(value)?);
        }
    }

    Ok(())
}

fn describe_asset(asset: &AssetSpec) -> String {
    match asset.label {
        Some(ref label) => format!("{} ({label})", asset.path),
        None => asset.path.clone(),
    }
}

fn format_value(value: &OptionValue) -> Result<String> {
    Ok(match value {
        OptionValue::String(s) => s.clone(),
        other => serde_json::to_string(other)?,
    })
}
