//! Validate command.

use std::path::Path;

use anyhow::Result;
use qokl_release_config::validate;

/// Runs the validate command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let config = super::load(config_path)?;
    let warnings = validate(&config)?;

    println!(
        "configuration is valid: {} branch(es), {} step(s)",
        config.branches.len(),
        config.plugins.len()
    );
    for warning in &warnings {
        println!("warning: {warning}");
    }

    Ok(())
}
