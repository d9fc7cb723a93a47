//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Turns an accent color into the CSS filter for the tinted duplicate image.
///
/// Usage in templates: `{{ accent|drop_shadow }}`
#[askama::filter_fn]
pub fn drop_shadow(color: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(crate::view::drop_shadow(&color.to_string()))
}
