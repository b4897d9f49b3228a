//! Starter pipelines written by `init`.

use crate::{AssetSpec, OptionValue, PluginInvocation, ReleasePipelineConfig};

/// Build script invoked by the publish step.
pub const BUILD_SCRIPT: &str = "build-release.sh";

/// Glob matching every archive produced by the build script.
pub const ARCHIVE_GLOB: &str = "qokl-*.tar.gz";

/// Default release branch.
pub const DEFAULT_BRANCH: &str = "main";

/// Flavor of the starter pipeline.
///
/// Both run the same four stages and differ only in how the build script
/// is invoked and how verbosely assets are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// `bash build-release.sh`, plus a labelled linux archive.
    #[default]
    Bash,
    /// `./build-release.sh`, bare globs only.
    Exec,
}

impl Preset {
    /// Builds the pipeline for this preset.
    pub fn config(self) -> ReleasePipelineConfig {
        let (publish_cmd, assets) = match self {
            Self::Bash => (
                format!("bash {BUILD_SCRIPT} ${{nextRelease.version}}"),
                vec![
                    AssetSpec::glob(ARCHIVE_GLOB),
                    AssetSpec::glob("qokl-linux-amd64-${nextRelease.version}.tar.gz")
                        .with_label("linux 64 distribution"),
                ],
            ),
            Self::Exec => (
                format!("./{BUILD_SCRIPT} ${{nextRelease.version}}"),
                vec![AssetSpec::glob(ARCHIVE_GLOB)],
            ),
        };

        ReleasePipelineConfig::new(
            vec![DEFAULT_BRANCH.to_string()],
            vec![
                PluginInvocation::new("@semantic-release/commit-analyzer"),
                PluginInvocation::new("@semantic-release/release-notes-generator"),
                PluginInvocation::new("@semantic-release/exec").with_option("publishCmd", publish_cmd),
                PluginInvocation::new("@semantic-release/github").with_option(
                    "assets",
                    assets.into_iter().map(OptionValue::from).collect::<Vec<_>>(),
                ),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PluginKind, validate};

    #[test]
    fn test_presets_are_valid() {
        for preset in [Preset::Bash, Preset::Exec] {
            let warnings = validate(&preset.config()).unwrap();
            assert!(warnings.is_empty(), "{preset:?}: {warnings:?}");
        }
    }

    #[test]
    fn test_presets_share_stages() {
        let kinds = |p: Preset| -> Vec<PluginKind> {
            p.config().plugins.iter().map(PluginInvocation::kind).collect()
        };
        assert_eq!(kinds(Preset::Bash), kinds(Preset::Exec));
        assert_eq!(
            kinds(Preset::Bash),
            vec![
                PluginKind::CommitAnalyzer,
                PluginKind::ReleaseNotes,
                PluginKind::Exec,
                PluginKind::GitHub,
            ]
        );
    }

    #[test]
    fn test_bash_preset() {
        let config = Preset::Bash.config();
        let exec = config.plugin("@semantic-release/exec").unwrap();
        assert_eq!(
            exec.string_option("publishCmd").unwrap(),
            Some("bash build-release.sh ${nextRelease.version}")
        );
        let assets = config.plugin("@semantic-release/github").unwrap().assets().unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[1].label.as_deref(), Some("linux 64 distribution"));
    }

    #[test]
    fn test_exec_preset() {
        let config = Preset::Exec.config();
        let exec = config.plugin("@semantic-release/exec").unwrap();
        assert_eq!(
            exec.string_option("publishCmd").unwrap(),
            Some("./build-release.sh ${nextRelease.version}")
        );
        let assets = config.plugin("@semantic-release/github").unwrap().assets().unwrap();
        assert_eq!(assets, vec![AssetSpec::glob("qokl-*.tar.gz")]);
    }
}
