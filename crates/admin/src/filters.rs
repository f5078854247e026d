//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use bundle_builder_core::ProductId;

/// Returns the numeric tail of a product gid, or the value unchanged.
///
/// Usage in templates: `{{ product.id|gid_tail }}`
#[askama::filter_fn]
pub fn gid_tail(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let id = ProductId::new(value.to_string());
    Ok(id.numeric().map_or_else(|| id.to_string(), str::to_string))
}
