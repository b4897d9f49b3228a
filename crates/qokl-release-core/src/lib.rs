//! Core library for qokl releases.
//!
//! This crate turns a loaded pipeline configuration into a concrete release
//! plan: option templates rendered for a version, and asset globs expanded
//! into files.

mod assets;
mod context;
mod error;
mod plan;
mod template;

pub use assets::{ResolvedAsset, expand_assets, render_asset, resolve_assets};
pub use context::{DEFAULT_TAG_FORMAT, ReleaseContext};
pub use error::{CoreError, CoreResult};
pub use plan::{PUBLISH_COMMAND_OPTION, PlannedStep, ReleasePlan};
pub use template::{render, render_value};
