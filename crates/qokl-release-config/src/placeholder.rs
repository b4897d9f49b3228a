//! `${...}` placeholders embedded in option strings.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `${path}` with optional whitespace inside the braces.
pub static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)\s*\}")
        .expect("invalid regex")
});

/// Variables available to option templates.
pub const KNOWN_VARIABLES: &[&str] = &[
    "nextRelease.version",
    "nextRelease.gitTag",
    "nextRelease.channel",
    "lastRelease.version",
    "lastRelease.gitTag",
    "branch.name",
];

/// Returns the variable paths referenced by `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Returns whether a variable path can be rendered.
pub fn is_known_variable(path: &str) -> bool {
    KNOWN_VARIABLES.contains(&path)
}
