//! Product domain types for Shopify Admin API.

use serde::{Deserialize, Serialize};

use bundle_builder_core::{Price, ProductId};

// =============================================================================
// Product Types
// =============================================================================

/// A product that can be added to a bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Minimum variant price.
    pub price: Price,
}

/// A product tagged as a bundle, before its members are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleProduct {
    /// Product ID of the bundle itself.
    pub id: ProductId,
    /// Bundle title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Raw bundle metafield value, if the metafield exists.
    pub metafield_value: Option<String>,
}

/// Result of a successful bundle product creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedProduct {
    /// New product ID.
    pub id: ProductId,
    /// New product title.
    pub title: String,
}
