//! Bundle drafts and the checks run before a bundle is created.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bundle::BundleData;
use crate::types::ProductId;

/// Reasons a draft cannot be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The bundle name is empty.
    #[error("Bundle name is required")]
    MissingName,

    /// No products were selected.
    #[error("Select at least one product for the bundle")]
    NoProducts,
}

/// A bundle as entered in the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleDraft {
    /// Bundle product title.
    pub name: String,
    /// Optional description (stored as the product's HTML description).
    pub description: Option<String>,
    /// Selected member product ids, in selection order.
    pub product_ids: Vec<ProductId>,
    /// Discount percentage.
    pub discount: i64,
}

/// A draft that passed validation and is ready to send to Shopify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBundle {
    /// Trimmed bundle title.
    pub title: String,
    /// Description, `None` when blank.
    pub description: Option<String>,
    /// Metafield payload.
    pub data: BundleData,
}

impl BundleDraft {
    /// Check the draft without consuming it.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: name first, then product selection.
    pub fn check(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.product_ids.is_empty() {
            return Err(DraftError::NoProducts);
        }
        Ok(())
    }

    /// Validate the draft and build the creation payload.
    ///
    /// The discount is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] if the name is blank or no product is
    /// selected.
    pub fn validate(self) -> Result<ValidBundle, DraftError> {
        self.check()?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(ValidBundle {
            title: self.name.trim().to_string(),
            description,
            data: BundleData::new(self.product_ids, self.discount),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(name: &str, ids: &[&str], discount: i64) -> BundleDraft {
        BundleDraft {
            name: name.to_string(),
            description: None,
            product_ids: ids.iter().copied().map(ProductId::from).collect(),
            discount,
        }
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let result = draft("Summer Set", &[], 10).validate();
        assert_eq!(result.unwrap_err(), DraftError::NoProducts);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let d = draft("   ", &["gid://shopify/Product/1"], 10);
        assert_eq!(d.check(), Err(DraftError::MissingName));
        assert_eq!(d.validate().unwrap_err(), DraftError::MissingName);
    }

    #[test]
    fn test_valid_draft_trims_and_keeps_discount() {
        let mut d = draft(
            "  Summer Set ",
            &["gid://shopify/Product/1", "gid://shopify/Product/1"],
            300,
        );
        d.description = Some("  ".to_string());

        let valid = d.validate().unwrap();
        assert_eq!(valid.title, "Summer Set");
        assert_eq!(valid.description, None);
        assert_eq!(valid.data.discount, 300);
        assert_eq!(valid.data.products.len(), 2);
    }
}
