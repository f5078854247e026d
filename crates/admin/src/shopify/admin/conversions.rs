//! Type conversions from GraphQL response types to domain types.
//!
//! These functions convert the generated `graphql_client` types
//! into our clean domain types.

use bundle_builder_core::ProductId;

use crate::shopify::types::{BundleProduct, CatalogProduct, CreatedProduct, Money};

use super::queries::{bundle_product_create, bundle_products, catalog_products, products_by_ids};

/// Convert a currency code enum to string.
fn currency_code_to_string<T: std::fmt::Debug>(code: T) -> String {
    format!("{code:?}")
}

// =============================================================================
// CatalogProducts conversions
// =============================================================================

pub fn convert_catalog_products(data: catalog_products::ResponseData) -> Vec<CatalogProduct> {
    data.products
        .edges
        .into_iter()
        .map(|edge| {
            let node = edge.node;
            let price = node.price_range_v2.min_variant_price;
            CatalogProduct {
                id: ProductId::new(node.id),
                title: node.title,
                price: Money {
                    amount: price.amount,
                    currency_code: currency_code_to_string(price.currency_code),
                }
                .to_price(),
            }
        })
        .collect()
}

// =============================================================================
// BundleProducts conversions
// =============================================================================

pub fn convert_bundle_products(data: bundle_products::ResponseData) -> Vec<BundleProduct> {
    data.products
        .edges
        .into_iter()
        .map(|edge| {
            let node = edge.node;
            BundleProduct {
                id: ProductId::new(node.id),
                title: node.title,
                description: node.description,
                metafield_value: node.metafield.map(|m| m.value),
            }
        })
        .collect()
}

// =============================================================================
// ProductsByIds conversions
// =============================================================================

/// Keep the `Product` nodes, in request order. Missing ids and nodes of
/// other types are dropped.
pub fn convert_product_nodes(data: products_by_ids::ResponseData) -> Vec<CatalogProduct> {
    use products_by_ids::ProductsByIdsNodesOn;

    data.nodes
        .into_iter()
        .flatten()
        .filter_map(|node| match node.on {
            ProductsByIdsNodesOn::Product(product) => {
                let price = product.price_range_v2.min_variant_price;
                Some(CatalogProduct {
                    id: ProductId::new(node.id),
                    title: product.title,
                    price: Money {
                        amount: price.amount,
                        currency_code: currency_code_to_string(price.currency_code),
                    }
                    .to_price(),
                })
            }
            _ => None,
        })
        .collect()
}

// =============================================================================
// BundleProductCreate conversions
// =============================================================================

pub fn convert_created_product(
    product: bundle_product_create::BundleProductCreateProductCreateProduct,
) -> CreatedProduct {
    CreatedProduct {
        id: ProductId::new(product.id),
        title: product.title,
    }
}
