//! `${...}` rendering of option strings.

use qokl_release_config::{OptionValue, PLACEHOLDER_RE};
use regex::Captures;

use crate::{CoreError, CoreResult, ReleaseContext};

/// Renders every `${path}` placeholder in `template`.
///
/// An unterminated `${` is left as is.
///
/// # Errors
///
/// Returns [`CoreError::UnknownVariable`] for the first placeholder the
/// context cannot provide.
pub fn render(template: &str, ctx: &ReleaseContext) -> CoreResult<String> {
    let mut unknown = None;
    let rendered = PLACEHOLDER_RE.replace_all(template, |caps: &Captures<'_>| {
        let path = &caps[1];
        ctx.variable(path).unwrap_or_else(|| {
            unknown.get_or_insert_with(|| path.to_string());
            String::new()
        })
    });

    match unknown {
        Some(path) => Err(CoreError::UnknownVariable(path)),
        None => Ok(rendered.into_owned()),
    }
}

/// Renders every string nested in an option value.
///
/// # Errors
///
/// Returns the first rendering error.
pub fn render_value(value: &OptionValue, ctx: &ReleaseContext) -> CoreResult<OptionValue> {
    value.try_map_strings(&mut |s| render(s, ctx))
}
