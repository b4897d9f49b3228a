//! Configuration schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::plugin::PluginKind;
use crate::{ConfigError, ConfigResult};

/// Option name holding the upload step's asset declarations.
pub const ASSETS_OPTION: &str = "assets";

/// Ordered option mapping of a plugin.
pub type PluginOptions = IndexMap<String, OptionValue>;

/// Release pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleasePipelineConfig {
    /// Branches allowed to produce a release.
    #[serde(default)]
    pub branches: Vec<String>,

    /// Plugins, in execution order.
    #[serde(default)]
    pub plugins: Vec<PluginInvocation>,
}

impl ReleasePipelineConfig {
    /// Creates a configuration from branches and steps.
    pub fn new(branches: Vec<String>, plugins: Vec<PluginInvocation>) -> Self {
        Self { branches, plugins }
    }

    /// Returns whether commits on `branch` may produce a release.
    pub fn is_release_branch(&self, branch: &str) -> bool {
        self.branches.iter().any(|b| b == branch)
    }

    /// Returns the first step with the given name.
    pub fn plugin(&self, name: &str) -> Option<&PluginInvocation> {
        self.plugins.iter().find(|p| p.name == name)
    }

    /// Returns all steps of the given kind, in order.
    pub fn plugins_of_kind(&self, kind: PluginKind) -> impl Iterator<Item = &PluginInvocation> {
        self.plugins.iter().filter(move |p| p.kind() == kind)
    }
}

/// A single pipeline step: a plugin name and its options.
///
/// Declared either as a bare name or as a `[name, options]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "PluginDeclaration", into = "PluginDeclaration")]
pub struct PluginInvocation {
    /// Plugin identifier, resolved by the orchestrator.
    pub name: String,

    /// Plugin options.
    pub options: PluginOptions,
}

impl PluginInvocation {
    /// Creates a step without options.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: PluginOptions::new(),
        }
    }

    /// Adds an option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the plugin's lifecycle role.
    pub fn kind(&self) -> PluginKind {
        PluginKind::from_name(&self.name)
    }

    /// Returns an option value.
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Returns a string option.
    ///
    /// # Errors
    ///
    /// Returns an error if the option is set but is not a string.
    pub fn string_option(&self, key: &str) -> ConfigResult<Option<&str>> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(ConfigError::InvalidOption {
                plugin: self.name.clone(),
                option: key.to_string(),
                reason: format!("expected a string, found {}", other.type_name()),
            }),
        }
    }

    /// Returns the declared release assets, in declaration order.
    ///
    /// A single glob or table counts as a one-element list. A missing
    /// `assets` option yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset is neither a glob nor a `{path, label}` table.
    pub fn assets(&self) -> ConfigResult<Vec<AssetSpec>> {
        match self.options.get(ASSETS_OPTION) {
            None => Ok(Vec::new()),
            Some(OptionValue::List(items)) => items
                .iter()
                .map(|item| AssetSpec::from_option(&self.name, item))
                .collect(),
            Some(single) => Ok(vec![AssetSpec::from_option(&self.name, single)?]),
        }
    }
}

/// Wire shape of a [`PluginInvocation`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PluginDeclaration {
    Bare(String),
    Configured(String, PluginOptions),
}

impl From<PluginDeclaration> for PluginInvocation {
    fn from(decl: PluginDeclaration) -> Self {
        match decl {
            PluginDeclaration::Bare(name) => Self::new(name),
            PluginDeclaration::Configured(name, options) => Self { name, options },
        }
    }
}

impl From<PluginInvocation> for PluginDeclaration {
    fn from(step: PluginInvocation) -> Self {
        if step.options.is_empty() {
            Self::Bare(step.name)
        } else {
            Self::Configured(step.name, step.options)
        }
    }
}

/// A plugin option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// String, possibly containing `${...}` placeholders.
    String(String),
    /// Sequence of values.
    List(Vec<OptionValue>),
    /// Nested mapping.
    Table(IndexMap<String, OptionValue>),
}

impl OptionValue {
    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Integer(_) => "an integer",
            Self::Float(_) => "a float",
            Self::String(_) => "a string",
            Self::List(_) => "a list",
            Self::Table(_) => "a table",
        }
    }

    /// Calls `f` on every string nested in this value.
    pub fn for_each_str<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        match self {
            Self::String(s) => f(s),
            Self::List(items) => {
                for item in items {
                    item.for_each_str(f);
                }
            }
            Self::Table(table) => {
                for item in table.values() {
                    item.for_each_str(f);
                }
            }
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) => {}
        }
    }

    /// Rebuilds this value with every nested string passed through `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map_strings<E>(
        &self,
        f: &mut impl FnMut(&str) -> Result<String, E>,
    ) -> Result<Self, E> {
        Ok(match self {
            Self::String(s) => Self::String(f(s)?),
            Self::List(items) => Self::List(
                items
                    .iter()
                    .map(|item| item.try_map_strings(&mut *f))
                    .collect::<Result<_, _>>()?,
            ),
            Self::Table(table) => Self::Table(
                table
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.try_map_strings(&mut *f)?)))
                    .collect::<Result<_, E>>()?,
            ),
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) => self.clone(),
        })
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<OptionValue>> for OptionValue {
    fn from(value: Vec<OptionValue>) -> Self {
        Self::List(value)
    }
}

impl From<AssetSpec> for OptionValue {
    fn from(asset: AssetSpec) -> Self {
        if asset.label.is_none() && asset.name.is_none() {
            return Self::String(asset.path);
        }
        let mut table = IndexMap::new();
        table.insert("path".to_string(), Self::String(asset.path));
        if let Some(label) = asset.label {
            table.insert("label".to_string(), Self::String(label));
        }
        if let Some(name) = asset.name {
            table.insert("name".to_string(), Self::String(name));
        }
        Self::Table(table)
    }
}

/// A release asset: a file glob with an optional display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AssetDeclaration", into = "AssetDeclaration")]
pub struct AssetSpec {
    /// Glob pattern, relative to the working directory.
    pub path: String,

    /// Display label shown on the release page.
    pub label: Option<String>,

    /// File name used for the upload, instead of the local file name.
    pub name: Option<String>,
}

impl AssetSpec {
    /// Creates a bare-glob asset.
    pub fn glob(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: None,
            name: None,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn from_option(plugin: &str, value: &OptionValue) -> ConfigResult<Self> {
        let invalid = |reason: String| ConfigError::InvalidOption {
            plugin: plugin.to_string(),
            option: ASSETS_OPTION.to_string(),
            reason,
        };

        match value {
            OptionValue::String(path) => Ok(Self::glob(path.clone())),
            OptionValue::Table(table) => {
                let field = |key: &str| -> ConfigResult<Option<String>> {
                    match table.get(key) {
                        None => Ok(None),
                        Some(OptionValue::String(s)) => Ok(Some(s.clone())),
                        Some(other) => Err(invalid(format!(
                            "`{key}` must be a string, found {}",
                            other.type_name()
                        ))),
                    }
                };
                let path = field("path")?
                    .ok_or_else(|| invalid("asset table is missing `path`".to_string()))?;
                Ok(Self {
                    path,
                    label: field("label")?,
                    name: field("name")?,
                })
            }
            other => Err(invalid(format!(
                "expected a glob or a {{path, label}} table, found {}",
                other.type_name()
            ))),
        }
    }
}

/// Wire shape of an [`AssetSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AssetDeclaration {
    Glob(String),
    Detailed {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl From<AssetDeclaration> for AssetSpec {
    fn from(decl: AssetDeclaration) -> Self {
        match decl {
            AssetDeclaration::Glob(path) => Self::glob(path),
            AssetDeclaration::Detailed { path, label, name } => Self { path, label, name },
        }
    }
}

impl From<AssetSpec> for AssetDeclaration {
    fn from(asset: AssetSpec) -> Self {
        if asset.label.is_none() && asset.name.is_none() {
            Self::Glob(asset.path)
        } else {
            Self::Detailed {
                path: asset.path,
                label: asset.label,
                name: asset.name,
            }
        }
    }
}
