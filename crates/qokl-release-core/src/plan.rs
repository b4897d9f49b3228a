//! Release plan: the pipeline rendered for one release.

use std::path::Path;

use qokl_release_config::{
    AssetSpec, PluginInvocation, PluginKind, PluginOptions, ReleasePipelineConfig,
};
use tracing::{debug, info};

use crate::assets::{ResolvedAsset, expand_assets};
use crate::template::render_value;
use crate::{CoreError, CoreResult, ReleaseContext};

/// Exec option holding the publish command.
pub const PUBLISH_COMMAND_OPTION: &str = "publishCmd";

/// One step of the plan, with its options rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStep {
    /// Lifecycle role of the plugin.
    pub kind: PluginKind,

    /// The step with every option string rendered.
    pub invocation: PluginInvocation,
}

impl PlannedStep {
    /// Plugin name.
    pub fn name(&self) -> &str {
        &self.invocation.name
    }

    /// Rendered options.
    pub fn options(&self) -> &PluginOptions {
        &self.invocation.options
    }
}

/// The ordered, rendered pipeline for a single release.
///
/// Building a plan never runs commands or contacts the release host.
#[derive(Debug, Clone)]
pub struct ReleasePlan {
    context: ReleaseContext,
    steps: Vec<PlannedStep>,
}

impl ReleasePlan {
    /// Builds the plan for the release described by `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch may not release or an option
    /// references an unknown variable.
    pub fn build(config: &ReleasePipelineConfig, ctx: &ReleaseContext) -> CoreResult<Self> {
        if !config.is_release_branch(&ctx.branch) {
            return Err(CoreError::IneligibleBranch {
                branch: ctx.branch.clone(),
                allowed: config.branches.clone(),
            });
        }

        let steps = config
            .plugins
            .iter()
            .map(|step| {
                let options = step
                    .options
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), render_value(value, ctx)?)))
                    .collect::<CoreResult<PluginOptions>>()?;
                debug!(plugin = %step.name, "step rendered");
                Ok(PlannedStep {
                    kind: step.kind(),
                    invocation: PluginInvocation {
                        name: step.name.clone(),
                        options,
                    },
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        info!(
            version = %ctx.next_version,
            branch = %ctx.branch,
            steps = steps.len(),
            "release plan built"
        );

        Ok(Self {
            context: ctx.clone(),
            steps,
        })
    }

    /// The release this plan was built for.
    pub fn context(&self) -> &ReleaseContext {
        &self.context
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    /// Rendered publish commands of the exec steps, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if a `publishCmd` is not a string.
    pub fn publish_commands(&self) -> CoreResult<Vec<String>> {
        let mut commands = Vec::new();
        for step in self.steps_of_kind(PluginKind::Exec) {
            if let Some(cmd) = step.invocation.string_option(PUBLISH_COMMAND_OPTION)? {
                commands.push(cmd.to_string());
            }
        }
        Ok(commands)
    }

    /// Rendered asset declarations of the upload steps, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset declaration is malformed.
    pub fn upload_assets(&self) -> CoreResult<Vec<AssetSpec>> {
        let mut assets = Vec::new();
        for step in self.steps_of_kind(PluginKind::GitHub) {
            assets.extend(step.invocation.assets()?);
        }
        Ok(assets)
    }

    /// Expands the upload assets against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset declaration or glob is malformed.
    pub fn resolve_assets(&self, base_dir: &Path) -> CoreResult<Vec<ResolvedAsset>> {
        expand_assets(&self.upload_assets()?, base_dir)
    }

    fn steps_of_kind(&self, kind: PluginKind) -> impl Iterator<Item = &PlannedStep> {
        self.steps.iter().filter(move |step| step.kind == kind)
    }
}
