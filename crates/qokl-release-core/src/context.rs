//! Values available to option templates.

use semver::Version;

/// Default git tag format.
pub const DEFAULT_TAG_FORMAT: &str = "v${version}";

/// Release being prepared, as seen by option templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// The version computed by commit analysis.
    pub next_version: Version,

    /// Branch the release is cut from.
    pub branch: String,

    /// Distribution channel, if any.
    pub channel: Option<String>,

    /// The previous release, if any.
    pub last_version: Option<Version>,

    /// Tag format, where `${version}` stands for the version.
    pub tag_format: String,
}

impl ReleaseContext {
    /// Creates a release context.
    pub fn new(next_version: Version, branch: impl Into<String>) -> Self {
        Self {
            next_version,
            branch: branch.into(),
            channel: None,
            last_version: None,
            tag_format: DEFAULT_TAG_FORMAT.to_string(),
        }
    }

    /// Sets the tag format.
    #[must_use]
    pub fn with_tag_format(mut self, tag_format: impl Into<String>) -> Self {
        self.tag_format = tag_format.into();
        self
    }

    /// Sets the previous release.
    #[must_use]
    pub fn with_last_release(mut self, version: Version) -> Self {
        self.last_version = Some(version);
        self
    }

    /// Sets the distribution channel.
    #[must_use]
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Returns the git tag for a version (e.g., "v1.2.3").
    pub fn tag_for(&self, version: &Version) -> String {
        self.tag_format.replace("${version}", &version.to_string())
    }

    /// Looks up a template variable.
    ///
    /// Unset optional values render as an empty string.
    pub fn variable(&self, path: &str) -> Option<String> {
        let value = match path {
            "nextRelease.version" => self.next_version.to_string(),
            "nextRelease.gitTag" => self.tag_for(&self.next_version),
            "nextRelease.channel" => self.channel.clone().unwrap_or_default(),
            "lastRelease.version" => self
                .last_version
                .as_ref()
                .map(Version::to_string)
                .unwrap_or_default(),
            "lastRelease.gitTag" => self
                .last_version
                .as_ref()
                .map(|v| self.tag_for(v))
                .unwrap_or_default(),
            "branch.name" => self.branch.clone(),
            _ => return None,
        };
        Some(value)
    }
}
