//! Bundle Builder Core - bundle types, codec and pricing.
//!
//! This crate provides the data-shape logic shared by the admin binary and
//! its tests:
//! - `types` - Shopify product ids and prices
//! - `bundle` - the metafield codec that stores bundle membership
//! - `pricing` - total and discounted bundle prices
//! - `draft` - validation of a bundle before it is created
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. All persistence lives in Shopify and is reached from the admin
//! crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bundle;
pub mod draft;
pub mod pricing;
pub mod types;

pub use bundle::{
    BUNDLE_METAFIELD_KEY, BUNDLE_METAFIELD_NAMESPACE, BUNDLE_METAFIELD_TYPE, BUNDLE_TAG,
    BundleData, BundleDecodeError, DISCOUNT_CHOICES, DEFAULT_DISCOUNT,
};
pub use draft::{BundleDraft, DraftError, ValidBundle};
pub use pricing::BundlePricing;
pub use types::*;
