//! Release asset resolution.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::Pattern;
use qokl_release_config::AssetSpec;
use tracing::{debug, warn};

use crate::template::render;
use crate::{CoreError, CoreResult, ReleaseContext};

/// A file that would be attached to the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    /// Local file.
    pub path: PathBuf,

    /// Display label.
    pub label: Option<String>,

    /// Upload file name override.
    pub name: Option<String>,
}

impl ResolvedAsset {
    /// Name the file is uploaded under.
    pub fn upload_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

/// Renders the templates inside an asset declaration.
///
/// # Errors
///
/// Returns an error if a template references an unknown variable.
pub fn render_asset(asset: &AssetSpec, ctx: &ReleaseContext) -> CoreResult<AssetSpec> {
    Ok(AssetSpec {
        path: render(&asset.path, ctx)?,
        label: asset.label.as_deref().map(|l| render(l, ctx)).transpose()?,
        name: asset.name.as_deref().map(|n| render(n, ctx)).transpose()?,
    })
}

/// Renders and expands asset declarations against `base_dir`.
///
/// # Errors
///
/// Returns an error if rendering fails or a glob is malformed.
pub fn resolve_assets(
    assets: &[AssetSpec],
    base_dir: &Path,
    ctx: &ReleaseContext,
) -> CoreResult<Vec<ResolvedAsset>> {
    let rendered = assets
        .iter()
        .map(|asset| render_asset(asset, ctx))
        .collect::<CoreResult<Vec<_>>>()?;
    expand_assets(&rendered, base_dir)
}

/// Expands already rendered asset globs against `base_dir`.
///
/// Matches of one declaration are sorted; declarations keep their order.
/// A file matched twice keeps its first declaration. Globs matching
/// nothing are skipped with a warning.
///
/// # Errors
///
/// Returns an error if a glob is malformed or a match cannot be read.
pub fn expand_assets(assets: &[AssetSpec], base_dir: &Path) -> CoreResult<Vec<ResolvedAsset>> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for asset in assets {
        let pattern = if Path::new(&asset.path).is_absolute() {
            asset.path.clone()
        } else {
            let base = Pattern::escape(&base_dir.to_string_lossy());
            format!("{}/{}", base.trim_end_matches('/'), asset.path)
        };

        let paths = glob::glob(&pattern).map_err(|source| CoreError::GlobPattern {
            pattern: asset.path.clone(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in paths {
            let path = entry?;
            if path.is_file() {
                matches.push(path);
            }
        }
        matches.sort();

        if matches.is_empty() {
            warn!(pattern = %asset.path, "asset pattern matched no files");
            continue;
        }
        debug!(pattern = %asset.path, count = matches.len(), "asset pattern matched");

        for path in matches {
            if seen.insert(path.clone()) {
                resolved.push(ResolvedAsset {
                    path,
                    label: asset.label.clone(),
                    name: asset.name.clone(),
                });
            }
        }
    }

    Ok(resolved)
}
