//! Well-known release plugins.

use std::fmt;

/// Scope shared by the stock release plugins.
pub const SEMANTIC_RELEASE_SCOPE: &str = "@semantic-release/";

/// Role a plugin plays in the release lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    /// Classifies commits into a version bump.
    CommitAnalyzer,
    /// Generates release notes.
    ReleaseNotes,
    /// Runs shell commands at lifecycle steps.
    Exec,
    /// Creates the hosted release and uploads assets.
    GitHub,
    /// Anything not recognized.
    Other,
}

impl PluginKind {
    /// Classifies a plugin by name.
    ///
    /// The `@semantic-release/` scope is optional, so `exec` and
    /// `@semantic-release/exec` are the same plugin.
    pub fn from_name(name: &str) -> Self {
        let short = name.trim();
        let short = short.strip_prefix(SEMANTIC_RELEASE_SCOPE).unwrap_or(short);
        match short {
            "commit-analyzer" => Self::CommitAnalyzer,
            "release-notes-generator" => Self::ReleaseNotes,
            "exec" => Self::Exec,
            "github" => Self::GitHub,
            _ => Self::Other,
        }
    }

    /// Position in the lifecycle: analysis, then notes, then publishing.
    ///
    /// Unknown plugins have no rank and are never reported as misordered.
    pub fn lifecycle_rank(self) -> Option<u8> {
        match self {
            Self::CommitAnalyzer => Some(0),
            Self::ReleaseNotes => Some(1),
            Self::Exec | Self::GitHub => Some(2),
            Self::Other => None,
        }
    }

    /// Short label used in CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommitAnalyzer => "analyze",
            Self::ReleaseNotes => "notes",
            Self::Exec => "exec",
            Self::GitHub => "github",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
