//! Bundle service: catalog reads, bundle resolution and bundle creation.
//!
//! Reading bundles is a two step process:
//! 1. Fetch the first page of products tagged `bundle` with their raw metafield
//! 2. Decode each metafield and look up the member products, a bounded number
//!    of bundles at a time
//!
//! A bundle whose metafield is missing or malformed becomes
//! [`BundleResolution::Unresolved`]; it never aborts the read. Bundles with no
//! resolved members are dropped by [`displayable`] before rendering.

use futures::{StreamExt, TryStreamExt, stream};
use thiserror::Error;
use tracing::{info, instrument, warn};

use bundle_builder_core::{
    BundleData, BundleDecodeError, BundleDraft, BundlePricing, DraftError, ProductId,
};

use crate::config::CatalogConfig;
use crate::shopify::{AdminClient, AdminShopifyError, BundleProduct, CatalogProduct, CreatedProduct};

/// A bundle whose members were looked up.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBundle {
    /// Product ID of the bundle.
    pub id: ProductId,
    /// Bundle title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Discount percentage from the metafield.
    pub discount: i64,
    /// Member products that still exist, in stored order.
    pub products: Vec<CatalogProduct>,
}

impl ResolvedBundle {
    /// Total and discounted price of the resolved members.
    #[must_use]
    pub fn pricing(&self) -> BundlePricing {
        BundlePricing::calculate(self.products.iter().map(|p| &p.price), self.discount)
    }
}

/// A bundle whose metafield could not be decoded.
#[derive(Debug)]
pub struct UnresolvedBundle {
    /// Product ID of the bundle.
    pub id: ProductId,
    /// Bundle title.
    pub title: String,
    /// Why decoding failed.
    pub reason: BundleDecodeError,
}

/// Outcome of resolving one bundle product.
#[derive(Debug)]
pub enum BundleResolution {
    Resolved(ResolvedBundle),
    Unresolved(UnresolvedBundle),
}

impl BundleResolution {
    /// Number of member products that were resolved.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        match self {
            Self::Resolved(bundle) => bundle.products.len(),
            Self::Unresolved(_) => 0,
        }
    }
}

/// Keep only bundles with at least one resolved product, preserving order.
#[must_use]
pub fn displayable(resolutions: Vec<BundleResolution>) -> Vec<ResolvedBundle> {
    resolutions
        .into_iter()
        .filter_map(|resolution| match resolution {
            BundleResolution::Resolved(bundle) if !bundle.products.is_empty() => Some(bundle),
            _ => None,
        })
        .collect()
}

/// Errors from the bundle creation flow.
#[derive(Debug, Error)]
pub enum BundleCreateError {
    /// The draft failed validation; nothing was sent to Shopify.
    #[error(transparent)]
    Invalid(#[from] DraftError),

    /// Shopify rejected or failed the request.
    #[error(transparent)]
    Shopify(#[from] AdminShopifyError),
}

impl BundleCreateError {
    /// Message suitable for showing to the merchant.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(e) => e.to_string(),
            Self::Shopify(e) => e.user_message(),
        }
    }
}

/// Everything the bundle pages render.
#[derive(Debug, Clone, Default)]
pub struct BundleCatalog {
    /// Products that can be added to a bundle.
    pub products: Vec<CatalogProduct>,
    /// Bundles with at least one resolved product.
    pub bundles: Vec<ResolvedBundle>,
}

/// Bundle operations against the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct BundleService {
    client: AdminClient,
    catalog: CatalogConfig,
}

impl BundleService {
    /// Create a new bundle service.
    #[must_use]
    pub const fn new(client: AdminClient, catalog: CatalogConfig) -> Self {
        Self { client, catalog }
    }

    /// First page of products that can be added to a bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify request fails.
    pub async fn catalog_products(&self) -> Result<Vec<CatalogProduct>, AdminShopifyError> {
        self.client
            .list_catalog_products(self.catalog.page_size)
            .await
    }

    /// Fetch and resolve the first page of bundles.
    ///
    /// Output order matches the order Shopify returned the bundles in.
    ///
    /// # Errors
    ///
    /// Returns an error if listing bundles or any member lookup fails.
    #[instrument(skip(self))]
    pub async fn resolve_bundles(&self) -> Result<Vec<BundleResolution>, AdminShopifyError> {
        let bundles = self
            .client
            .list_bundle_products(self.catalog.page_size)
            .await?;

        stream::iter(bundles)
            .map(|bundle| self.resolve_bundle(bundle))
            .buffered(self.catalog.resolve_concurrency.max(1))
            .try_collect()
            .await
    }

    /// Bundles ready for display.
    ///
    /// # Errors
    ///
    /// Returns an error if a Shopify request fails.
    pub async fn list_bundles(&self) -> Result<Vec<ResolvedBundle>, AdminShopifyError> {
        Ok(displayable(self.resolve_bundles().await?))
    }

    /// Load products and bundles for the creator page, one after the other.
    ///
    /// # Errors
    ///
    /// Returns an error if a Shopify request fails.
    pub async fn load_catalog(&self) -> Result<BundleCatalog, AdminShopifyError> {
        let products = self.catalog_products().await?;
        let bundles = self.list_bundles().await?;
        Ok(BundleCatalog { products, bundles })
    }

    /// Validate a draft and create the bundle product.
    ///
    /// Invalid drafts are rejected before any request is made.
    ///
    /// # Errors
    ///
    /// Returns `BundleCreateError::Invalid` for a blank name or empty
    /// selection, and `BundleCreateError::Shopify` when the mutation fails.
    #[instrument(skip(self, draft), fields(name = %draft.name, products = draft.product_ids.len()))]
    pub async fn create_bundle(
        &self,
        draft: BundleDraft,
    ) -> Result<CreatedProduct, BundleCreateError> {
        let bundle = draft.validate()?;
        let created = self.client.create_bundle_product(&bundle).await?;

        info!(
            bundle_id = %created.id,
            title = %created.title,
            discount = bundle.data.discount,
            "Bundle created"
        );

        Ok(created)
    }

    async fn resolve_bundle(
        &self,
        bundle: BundleProduct,
    ) -> Result<BundleResolution, AdminShopifyError> {
        let data = match BundleData::decode(bundle.metafield_value.as_deref()) {
            Ok(data) => data,
            Err(reason) => {
                warn!(bundle_id = %bundle.id, error = %reason, "Skipping bundle with unreadable metafield");
                return Ok(BundleResolution::Unresolved(UnresolvedBundle {
                    id: bundle.id,
                    title: bundle.title,
                    reason,
                }));
            }
        };

        let products = self.client.get_products_by_ids(&data.products).await?;

        Ok(BundleResolution::Resolved(ResolvedBundle {
            id: bundle.id,
            title: bundle.title,
            description: bundle.description,
            discount: data.discount,
            products,
        }))
    }
}
