//! CLI definition.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Validate and inspect the qokl release pipeline.
#[derive(Debug, Parser)]
#[command(name = "qokl-release")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (discovered from the current directory if omitted)
    #[arg(short, long, global = true, env = "QOKL_RELEASE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter release configuration
    Init(commands::init::InitArgs),

    /// Check the release configuration
    Validate,

    /// Print the normalized release configuration
    Show(commands::show::ShowArgs),

    /// Render the pipeline for a given next version
    Plan(commands::plan::PlanArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            Commands::Init(args) => commands::init::run(args, config),
            Commands::Validate => commands::validate::run(config),
            Commands::Show(args) => commands::show::run(args, config),
            Commands::Plan(args) => commands::plan::run(args, config),
        }
    }
}
