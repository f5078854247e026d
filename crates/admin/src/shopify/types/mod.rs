//! Domain types for Shopify Admin API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! GraphQL response types in `queries`.

pub mod common;
pub mod product;

pub use common::*;
pub use product::*;
