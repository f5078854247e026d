//! Bundle metafield codec.
//!
//! A bundle is an ordinary Shopify product tagged [`BUNDLE_TAG`] whose
//! membership lives in a single JSON metafield:
//!
//! ```json
//! {"products":["gid://shopify/Product/1","gid://shopify/Product/2"],"discount":10}
//! ```
//!
//! There is no schema version. Adding a field means migrating every stored
//! value out of band.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::ProductId;

/// Tag that marks a product as a bundle.
pub const BUNDLE_TAG: &str = "bundle";

/// Metafield namespace holding bundle data.
pub const BUNDLE_METAFIELD_NAMESPACE: &str = "bundle_builder";

/// Metafield key holding bundle data.
pub const BUNDLE_METAFIELD_KEY: &str = "bundle_data";

/// Shopify metafield type used when writing bundle data.
pub const BUNDLE_METAFIELD_TYPE: &str = "json";

/// Discount percentages offered when creating a bundle.
pub const DISCOUNT_CHOICES: [i64; 5] = [5, 10, 15, 20, 25];

/// Discount preselected in the creation form.
pub const DEFAULT_DISCOUNT: i64 = 10;

/// Decoded bundle metafield.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleData {
    /// Member product ids, in stored order. Duplicates are kept.
    pub products: Vec<ProductId>,
    /// Discount percentage. Not range-checked.
    pub discount: i64,
}

/// Why a stored metafield value could not be decoded.
#[derive(Debug, Error)]
pub enum BundleDecodeError {
    /// The product has no bundle metafield.
    #[error("bundle metafield is missing")]
    Missing,

    /// The value is not JSON or does not have the bundle shape.
    #[error("bundle metafield is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl BundleData {
    /// Create bundle data from member ids and a discount.
    #[must_use]
    pub const fn new(products: Vec<ProductId>, discount: i64) -> Self {
        Self { products, discount }
    }

    /// Serialize to the string stored as the metafield value.
    ///
    /// # Errors
    ///
    /// Returns an error only if `serde_json` fails to serialize, which does
    /// not happen for this shape in practice.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored metafield value.
    ///
    /// # Errors
    ///
    /// Returns [`BundleDecodeError::Missing`] when `value` is `None` and
    /// [`BundleDecodeError::Malformed`] when it does not parse as bundle data.
    pub fn decode(value: Option<&str>) -> Result<Self, BundleDecodeError> {
        let raw = value.ok_or(BundleDecodeError::Missing)?;
        Ok(serde_json::from_str(raw)?)
    }
}
