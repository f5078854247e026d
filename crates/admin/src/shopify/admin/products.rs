//! Product reads and bundle creation for the Admin API.

use tracing::instrument;

use bundle_builder_core::{
    BUNDLE_METAFIELD_KEY, BUNDLE_METAFIELD_NAMESPACE, BUNDLE_METAFIELD_TYPE, BUNDLE_TAG,
    ProductId, ValidBundle,
};

use super::{
    AdminClient, AdminShopifyError,
    conversions::{
        convert_bundle_products, convert_catalog_products, convert_created_product,
        convert_product_nodes,
    },
    queries::{
        BundleProductCreate, BundleProducts, CatalogProducts, ProductsByIds,
        bundle_product_create, bundle_products, catalog_products, products_by_ids,
    },
};
use crate::shopify::types::{BundleProduct, CatalogProduct, CreatedProduct};

/// Search query selecting products that are not bundles.
fn catalog_query() -> String {
    format!("-tag:{BUNDLE_TAG}")
}

/// Search query selecting bundle products.
fn bundle_query() -> String {
    format!("tag:{BUNDLE_TAG}")
}

impl AdminClient {
    /// Get the first page of products that are not bundles.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_catalog_products(
        &self,
        first: i64,
    ) -> Result<Vec<CatalogProduct>, AdminShopifyError> {
        let variables = catalog_products::Variables {
            first,
            query: Some(catalog_query()),
        };

        let response = self.execute::<CatalogProducts>(variables).await?;

        Ok(convert_catalog_products(response))
    }

    /// Get the first page of bundle products with their raw metafield value.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_bundle_products(
        &self,
        first: i64,
    ) -> Result<Vec<BundleProduct>, AdminShopifyError> {
        let variables = bundle_products::Variables {
            first,
            query: Some(bundle_query()),
            namespace: BUNDLE_METAFIELD_NAMESPACE.to_string(),
            key: BUNDLE_METAFIELD_KEY.to_string(),
        };

        let response = self.execute::<BundleProducts>(variables).await?;

        Ok(convert_bundle_products(response))
    }

    /// Look up products by id in one batch.
    ///
    /// Ids that no longer exist are skipped, so the result may be shorter
    /// than `ids`. An empty `ids` slice makes no request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_products_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<CatalogProduct>, AdminShopifyError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let variables = products_by_ids::Variables {
            ids: ids.iter().map(|id| id.as_str().to_string()).collect(),
        };

        let response = self.execute::<ProductsByIds>(variables).await?;

        Ok(convert_product_nodes(response))
    }

    /// Create a bundle product.
    ///
    /// Sets title, description, the bundle tag, `ACTIVE` status and the
    /// bundle metafield in a single `productCreate` call.
    ///
    /// # Errors
    ///
    /// Returns `AdminShopifyError::UserError` carrying the first user error
    /// reported by Shopify, or another variant if the request itself fails.
    #[instrument(skip(self, bundle), fields(title = %bundle.title, products = bundle.data.products.len()))]
    pub async fn create_bundle_product(
        &self,
        bundle: &ValidBundle,
    ) -> Result<CreatedProduct, AdminShopifyError> {
        use bundle_product_create::{MetafieldInput, ProductCreateInput, ProductStatus, Variables};

        let variables = Variables {
            product: ProductCreateInput {
                title: Some(bundle.title.clone()),
                description_html: bundle.description.clone(),
                tags: Some(vec![BUNDLE_TAG.to_string()]),
                status: Some(ProductStatus::ACTIVE),
                metafields: Some(vec![MetafieldInput {
                    namespace: Some(BUNDLE_METAFIELD_NAMESPACE.to_string()),
                    key: BUNDLE_METAFIELD_KEY.to_string(),
                    value: bundle.data.encode()?,
                    type_: Some(BUNDLE_METAFIELD_TYPE.to_string()),
                }]),
            },
        };

        let response = self.execute::<BundleProductCreate>(variables).await?;

        let payload = response.product_create.ok_or_else(|| {
            AdminShopifyError::UserError("No response from productCreate".to_string())
        })?;

        if let Some(first) = payload.user_errors.into_iter().next() {
            return Err(AdminShopifyError::UserError(first.message));
        }

        payload
            .product
            .map(convert_created_product)
            .ok_or_else(|| AdminShopifyError::UserError("Product was not created".to_string()))
    }
}
