//! Configuration loader.

use std::path::Path;

use tracing::{debug, warn};

use crate::validate::validate;
use crate::{ConfigError, ConfigResult, ReleasePipelineConfig};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "qokl-release.toml";

/// File names searched in each directory, in order of preference.
pub const CONFIG_FILE_NAMES: &[&str] = &[CONFIG_FILE_NAME, ".releaserc.toml", ".releaserc.json"];

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// TOML document.
    #[default]
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Picks the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Parses and validates configuration text.
///
/// Validation warnings are logged, not returned.
///
/// # Errors
///
/// Returns an error if the text cannot be parsed or fails validation.
pub fn parse_config(content: &str, format: ConfigFormat) -> ConfigResult<ReleasePipelineConfig> {
    let config: ReleasePipelineConfig = match format {
        ConfigFormat::Toml => toml::from_str(content)?,
        ConfigFormat::Json => serde_json::from_str(content)?,
    };

    for warning in validate(&config)? {
        warn!(%warning, "configuration warning");
    }
    debug!(
        branches = config.branches.len(),
        steps = config.plugins.len(),
        "configuration parsed"
    );

    Ok(config)
}

/// Serializes a configuration.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_string(config: &ReleasePipelineConfig, format: ConfigFormat) -> ConfigResult<String> {
    match format {
        ConfigFormat::Toml => Ok(toml::to_string(config)?),
        ConfigFormat::Json => {
            let mut json = serde_json::to_string_pretty(config)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Loads configuration from the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<ReleasePipelineConfig> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config(&content, ConfigFormat::from_path(path))
}

/// Finds and loads configuration from the current directory or parents.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be loaded.
pub fn find_and_load_config() -> ConfigResult<ReleasePipelineConfig> {
    let current_dir = std::env::current_dir()?;
    find_and_load_config_from(&current_dir)
}

/// Finds and loads configuration starting from the given directory.
///
/// Walks up the directory tree until a configuration file is found.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be loaded.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<ReleasePipelineConfig> {
    let start_dir = start_dir.as_ref();
    let mut dir = start_dir;

    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = dir.join(name);
            if config_path.is_file() {
                return load_config(config_path);
            }
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PIPELINE_TOML: &str = r#"
        branches = ["main"]
        plugins = [
            "@semantic-release/commit-analyzer",
            "@semantic-release/release-notes-generator",
            ["@semantic-release/exec", { publishCmd = "bash build-release.sh ${nextRelease.version}" }],
            ["@semantic-release/github", { assets = ["qokl-*.tar.gz"] }],
        ]
    "#;

    const PIPELINE_JSON: &str = r#"{
        "branches": ["main"],
        "plugins": [
            "@semantic-release/commit-analyzer",
            "@semantic-release/release-notes-generator",
            ["@semantic-release/exec", { "publishCmd": "./build-release.sh ${nextRelease.version}" }],
            ["@semantic-release/github", { "assets": ["qokl-*.tar.gz"] }]
        ]
    }"#;

    #[test]
    fn test_config_file_name() {
        assert_eq!(CONFIG_FILE_NAME, "qokl-release.toml");
        assert_eq!(CONFIG_FILE_NAMES[0], CONFIG_FILE_NAME);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new(".releaserc.json")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("release.JSON")),
            ConfigFormat::Json
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("qokl-release.toml")),
            ConfigFormat::Toml
        );
        assert_eq!(ConfigFormat::from_path(Path::new("noext")), ConfigFormat::Toml);
    }

    #[test]
    fn test_parse_scenario_a() {
        let config = parse_config(PIPELINE_TOML, ConfigFormat::Toml).unwrap();
        assert_eq!(config.branches.len(), 1);
        assert_eq!(config.plugins.len(), 4);
    }

    #[test]
    fn test_parse_json() {
        let config = parse_config(PIPELINE_JSON, ConfigFormat::Json).unwrap();
        assert_eq!(config.plugins.len(), 4);
        assert_eq!(
            config.plugins[2].string_option("publishCmd").unwrap(),
            Some("./build-release.sh ${nextRelease.version}")
        );
    }

    #[test]
    fn test_parse_empty_plugins_rejected() {
        let result = parse_config("branches = [\"main\"]\nplugins = []\n", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::EmptyPipeline)));
    }

    #[test]
    fn test_parse_empty_document_rejected() {
        let result = parse_config("", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::NoBranches)));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config("this is not valid toml [[[", ConfigFormat::Toml);
        assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_config("{ branches: ", ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = parse_config(PIPELINE_TOML, ConfigFormat::Toml).unwrap();
        let text = to_string(&config, ConfigFormat::Toml).unwrap();
        let reparsed = parse_config(&text, ConfigFormat::Toml).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_json_round_trip() {
        let config = parse_config(PIPELINE_JSON, ConfigFormat::Json).unwrap();
        let text = to_string(&config, ConfigFormat::Json).unwrap();
        assert!(text.ends_with('\n'));
        let reparsed = parse_config(&text, ConfigFormat::Json).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_load_config_not_found() {
        let result = load_config("/nonexistent/path/qokl-release.toml");
        match result {
            Err(ConfigError::NotFound(path)) => {
                assert!(path.to_string_lossy().contains("qokl-release.toml"));
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_config_valid() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, PIPELINE_TOML).unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.branches, vec!["main".to_string()]);
    }

    #[test]
    fn test_load_config_json_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".releaserc.json");
        fs::write(&config_path, PIPELINE_JSON).unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.plugins.len(), 4);
    }

    #[test]
    fn test_find_and_load_config_in_temp_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), PIPELINE_TOML).unwrap();

        let config = find_and_load_config_from(temp_dir.path()).unwrap();
        assert_eq!(config.plugins.len(), 4);
    }

    #[test]
    fn test_find_and_load_config_in_parent() {
        let parent_dir = TempDir::new().unwrap();
        fs::write(parent_dir.path().join(".releaserc.json"), PIPELINE_JSON).unwrap();

        let child_dir = parent_dir.path().join("subdir");
        fs::create_dir(&child_dir).unwrap();

        let config = find_and_load_config_from(&child_dir).unwrap();
        assert_eq!(config.plugins.len(), 4);
    }

    #[test]
    fn test_find_prefers_toml_over_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), PIPELINE_TOML).unwrap();
        fs::write(temp_dir.path().join(".releaserc.json"), PIPELINE_JSON).unwrap();

        let config = find_and_load_config_from(temp_dir.path()).unwrap();
        assert_eq!(
            config.plugins[2].string_option("publishCmd").unwrap(),
            Some("bash build-release.sh ${nextRelease.version}")
        );
    }
}
