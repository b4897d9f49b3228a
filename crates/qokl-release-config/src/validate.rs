//! Structural validation of a loaded configuration.

use std::collections::HashSet;
use std::fmt;

use crate::placeholder::{is_known_variable, placeholders};
use crate::plugin::PluginKind;
use crate::{ConfigError, ConfigResult, ReleasePipelineConfig};

/// Suffix shared by the exec plugin's lifecycle command options.
const COMMAND_OPTION_SUFFIX: &str = "Cmd";

/// A problem that does not prevent a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// A step runs after a step that belongs later in the lifecycle.
    OutOfOrder {
        /// The misplaced step.
        plugin: String,
        /// Its position in `plugins`.
        index: usize,
        /// The earlier step it should precede.
        after: String,
    },

    /// The same plugin is declared more than once.
    DuplicatePlugin {
        /// Plugin name.
        plugin: String,
        /// Position of the repeated declaration.
        index: usize,
    },

    /// A template references a variable that cannot be rendered.
    UnknownVariable {
        /// Plugin name.
        plugin: String,
        /// Variable path inside `${...}`.
        variable: String,
    },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfOrder {
                plugin,
                index,
                after,
            } => write!(f, "plugin `{plugin}` (#{index}) should run before `{after}`"),
            Self::DuplicatePlugin { plugin, index } => {
                write!(f, "plugin `{plugin}` is declared again at #{index}")
            }
            Self::UnknownVariable { plugin, variable } => {
                write!(f, "plugin `{plugin}` references unknown variable `${{{variable}}}`")
            }
        }
    }
}

/// Validates a configuration.
///
/// Returns the non-fatal warnings found.
///
/// # Errors
///
/// Returns an error if the configuration cannot drive a release: no
/// branches, an empty branch name, a duplicate branch, no plugins, an
/// empty plugin name, or malformed options on a well-known plugin.
pub fn validate(config: &ReleasePipelineConfig) -> ConfigResult<Vec<ValidationWarning>> {
    validate_branches(&config.branches)?;

    if config.plugins.is_empty() {
        return Err(ConfigError::EmptyPipeline);
    }

    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    // Highest-ranked step so far, with its name.
    let mut latest: Option<(u8, &str)> = None;

    for (index, step) in config.plugins.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(ConfigError::EmptyPluginName { index });
        }

        let kind = step.kind();
        match kind {
            PluginKind::Exec => {
                let has_command = step.options.iter().any(|(key, value)| {
                    key.ends_with(COMMAND_OPTION_SUFFIX) && value.as_str().is_some()
                });
                if !has_command {
                    return Err(ConfigError::MissingOption {
                        plugin: step.name.clone(),
                        expected: "at least one lifecycle command such as `publishCmd`"
                            .to_string(),
                    });
                }
            }
            PluginKind::GitHub => {
                for asset in step.assets()? {
                    if asset.path.trim().is_empty() {
                        return Err(ConfigError::InvalidOption {
                            plugin: step.name.clone(),
                            option: "assets".to_string(),
                            reason: "asset path is empty".to_string(),
                        });
                    }
                }
            }
            PluginKind::CommitAnalyzer | PluginKind::ReleaseNotes | PluginKind::Other => {}
        }

        if !seen.insert(step.name.as_str()) {
            warnings.push(ValidationWarning::DuplicatePlugin {
                plugin: step.name.clone(),
                index,
            });
        }

        if let Some(rank) = kind.lifecycle_rank() {
            match latest {
                Some((latest_rank, after)) if rank < latest_rank => {
                    warnings.push(ValidationWarning::OutOfOrder {
                        plugin: step.name.clone(),
                        index,
                        after: after.to_string(),
                    });
                }
                Some((latest_rank, _)) if rank == latest_rank => {}
                _ => latest = Some((rank, step.name.as_str())),
            }
        }

        let mut unknown = Vec::new();
        for value in step.options.values() {
            value.for_each_str(&mut |s| {
                unknown.extend(
                    placeholders(s)
                        .into_iter()
                        .filter(|var| !is_known_variable(var)),
                );
            });
        }
        warnings.extend(unknown.into_iter().map(|variable| {
            ValidationWarning::UnknownVariable {
                plugin: step.name.clone(),
                variable: variable.to_string(),
            }
        }));
    }

    Ok(warnings)
}

fn validate_branches(branches: &[String]) -> ConfigResult<()> {
    if branches.is_empty() {
        return Err(ConfigError::NoBranches);
    }

    let mut seen = HashSet::new();
    for (index, branch) in branches.iter().enumerate() {
        if branch.trim().is_empty() {
            return Err(ConfigError::EmptyBranchName { index });
        }
        if !seen.insert(branch.as_str()) {
            return Err(ConfigError::DuplicateBranch(branch.clone()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetSpec, OptionValue, PluginInvocation};

    fn analyzer() -> PluginInvocation {
        PluginInvocation::new("@semantic-release/commit-analyzer")
    }

    fn notes() -> PluginInvocation {
        PluginInvocation::new("@semantic-release/release-notes-generator")
    }

    fn exec() -> PluginInvocation {
        PluginInvocation::new("@semantic-release/exec")
            .with_option("publishCmd", "bash build-release.sh ${nextRelease.version}")
    }

    fn github() -> PluginInvocation {
        PluginInvocation::new("@semantic-release/github").with_option(
            "assets",
            vec![OptionValue::from(AssetSpec::glob("qokl-*.tar.gz"))],
        )
    }

    fn config(plugins: Vec<PluginInvocation>) -> ReleasePipelineConfig {
        ReleasePipelineConfig::new(vec!["main".to_string()], plugins)
    }

    #[test]
    fn test_valid_pipeline_has_no_warnings() {
        let warnings = validate(&config(vec![analyzer(), notes(), exec(), github()])).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_plugins_rejected() {
        let result = validate(&config(vec![]));
        assert!(matches!(result, Err(ConfigError::EmptyPipeline)));
    }

    #[test]
    fn test_empty_branches_rejected() {
        let cfg = ReleasePipelineConfig::new(vec![], vec![analyzer()]);
        assert!(matches!(validate(&cfg), Err(ConfigError::NoBranches)));
    }

    #[test]
    fn test_blank_branch_rejected() {
        let cfg = ReleasePipelineConfig::new(
            vec!["main".to_string(), "  ".to_string()],
            vec![analyzer()],
        );
        assert!(matches!(
            validate(&cfg),
            Err(ConfigError::EmptyBranchName { index: 1 })
        ));
    }

    #[test]
    fn test_duplicate_branch_rejected() {
        let cfg = ReleasePipelineConfig::new(
            vec!["main".to_string(), "main".to_string()],
            vec![analyzer()],
        );
        assert!(matches!(
            validate(&cfg),
            Err(ConfigError::DuplicateBranch(ref b)) if b == "main"
        ));
    }

    #[test]
    fn test_blank_plugin_name_rejected() {
        let result = validate(&config(vec![analyzer(), PluginInvocation::new("")]));
        assert!(matches!(
            result,
            Err(ConfigError::EmptyPluginName { index: 1 })
        ));
    }

    #[test]
    fn test_exec_without_command_rejected() {
        let step = PluginInvocation::new("@semantic-release/exec").with_option("shell", "bash");
        let result = validate(&config(vec![step]));
        assert!(matches!(result, Err(ConfigError::MissingOption { .. })));
    }

    #[test]
    fn test_exec_with_other_command_accepted() {
        let step = PluginInvocation::new("exec").with_option("prepareCmd", "make dist");
        assert!(validate(&config(vec![step])).is_ok());
    }

    #[test]
    fn test_github_empty_asset_path_rejected() {
        let step = PluginInvocation::new("@semantic-release/github")
            .with_option("assets", vec![OptionValue::from("")]);
        let result = validate(&config(vec![step]));
        assert!(matches!(result, Err(ConfigError::InvalidOption { .. })));
    }

    #[test]
    fn test_github_malformed_assets_rejected() {
        let step = PluginInvocation::new("@semantic-release/github")
            .with_option("assets", vec![OptionValue::Bool(true)]);
        assert!(validate(&config(vec![step])).is_err());
    }

    #[test]
    fn test_unknown_plugins_pass_through() {
        let step = PluginInvocation::new("@acme/custom").with_option("anything", true);
        assert!(validate(&config(vec![step])).unwrap().is_empty());
    }

    #[test]
    fn test_notes_after_upload_warns() {
        let warnings = validate(&config(vec![analyzer(), github(), notes()])).unwrap();
        assert_eq!(
            warnings,
            vec![ValidationWarning::OutOfOrder {
                plugin: "@semantic-release/release-notes-generator".to_string(),
                index: 2,
                after: "@semantic-release/github".to_string(),
            }]
        );
    }

    #[test]
    fn test_upload_before_publish_is_not_misordered() {
        let warnings = validate(&config(vec![analyzer(), notes(), github(), exec()])).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_duplicate_plugin_warns() {
        let warnings = validate(&config(vec![analyzer(), exec(), exec()])).unwrap();
        assert_eq!(
            warnings,
            vec![ValidationWarning::DuplicatePlugin {
                plugin: "@semantic-release/exec".to_string(),
                index: 2,
            }]
        );
    }

    #[test]
    fn test_unknown_variable_warns() {
        let step = PluginInvocation::new("exec")
            .with_option("publishCmd", "./build-release.sh ${nextRelease.notes}");
        let warnings = validate(&config(vec![step])).unwrap();
        assert_eq!(
            warnings,
            vec![ValidationWarning::UnknownVariable {
                plugin: "exec".to_string(),
                variable: "nextRelease.notes".to_string(),
            }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "plugin `exec` references unknown variable `${nextRelease.notes}`"
        );
    }

    #[test]
    fn test_out_of_order_display() {
        let warning = ValidationWarning::OutOfOrder {
            plugin: "notes".to_string(),
            index: 3,
            after: "github".to_string(),
        };
        assert_eq!(warning.to_string(), "plugin `notes` (#3) should run before `github`");
    }
}
