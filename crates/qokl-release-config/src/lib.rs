//! Release pipeline configuration for qokl.
//!
//! This crate loads, validates and serializes the declaration consumed by
//! the release orchestrator: the branches allowed to release and the ordered
//! list of plugins with their options.

mod error;
mod loader;
mod placeholder;
mod plugin;
mod preset;
mod schema;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAME, CONFIG_FILE_NAMES, ConfigFormat, find_and_load_config,
    find_and_load_config_from, load_config, parse_config, to_string,
};
pub use placeholder::{KNOWN_VARIABLES, PLACEHOLDER_RE, is_known_variable, placeholders};
pub use plugin::{PluginKind, SEMANTIC_RELEASE_SCOPE};
pub use preset::{ARCHIVE_GLOB, BUILD_SCRIPT, DEFAULT_BRANCH, Preset};
pub use schema::{
    ASSETS_OPTION, AssetSpec, OptionValue, PluginInvocation, PluginOptions, ReleasePipelineConfig,
};
pub use validate::{ValidationWarning, validate};
