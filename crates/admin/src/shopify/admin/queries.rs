//! GraphQL query definitions for Shopify Admin API.
//!
//! Uses `graphql_client` to generate type-safe Rust code from GraphQL queries.

use graphql_client::GraphQLQuery;

// =============================================================================
// Custom scalar type aliases (used by graphql_client)
// =============================================================================

/// Decimal number as string (preserves precision).
type Decimal = String;

// =============================================================================
// Product queries
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/bundles.graphql",
    response_derives = "Debug, Clone"
)]
pub struct CatalogProducts;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/bundles.graphql",
    response_derives = "Debug, Clone"
)]
pub struct BundleProducts;

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/bundles.graphql",
    response_derives = "Debug, Clone"
)]
pub struct ProductsByIds;

// =============================================================================
// Product mutations
// =============================================================================

#[derive(GraphQLQuery)]
#[graphql(
    schema_path = "graphql/admin/schema.graphql",
    query_path = "graphql/admin/queries/bundles.graphql",
    response_derives = "Debug, Clone"
)]
pub struct BundleProductCreate;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_body_uses_operation_name() {
        let body = CatalogProducts::build_query(catalog_products::Variables {
            first: 20,
            query: Some("-tag:bundle".to_string()),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "CatalogProducts");
        assert_eq!(json["variables"]["first"], 20);
        assert_eq!(json["variables"]["query"], "-tag:bundle");
        assert!(json["query"].as_str().unwrap().contains("priceRangeV2"));
    }

    #[test]
    fn test_create_input_serializes_schema_names() {
        use bundle_product_create::{MetafieldInput, ProductCreateInput, ProductStatus};

        let body = BundleProductCreate::build_query(bundle_product_create::Variables {
            product: ProductCreateInput {
                title: Some("Starter Kit".to_string()),
                description_html: None,
                tags: Some(vec!["bundle".to_string()]),
                status: Some(ProductStatus::ACTIVE),
                metafields: Some(vec![MetafieldInput {
                    namespace: Some("bundle_builder".to_string()),
                    key: "bundle_data".to_string(),
                    value: "{}".to_string(),
                    type_: Some("json".to_string()),
                }]),
            },
        });
        let json = serde_json::to_value(&body).unwrap();
        let product = &json["variables"]["product"];
        assert_eq!(product["title"], "Starter Kit");
        assert_eq!(product["status"], "ACTIVE");
        assert_eq!(product["metafields"][0]["type"], "json");
        assert!(product["descriptionHtml"].is_null());
    }

    #[test]
    fn test_nodes_response_tolerates_nulls_and_other_types() {
        use products_by_ids::ProductsByIdsNodesOn;

        let raw = r#"{"nodes":[
            null,
            {"__typename":"Collection","id":"gid://shopify/Collection/9"},
            {"__typename":"Product","id":"gid://shopify/Product/1","title":"Tee",
             "priceRangeV2":{"minVariantPrice":{"amount":"10.0","currencyCode":"USD"}}}
        ]}"#;
        let data: products_by_ids::ResponseData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.nodes.len(), 3);
        assert!(data.nodes[0].is_none());
        assert!(matches!(
            data.nodes[1].as_ref().unwrap().on,
            ProductsByIdsNodesOn::Collection
        ));
        assert!(matches!(
            data.nodes[2].as_ref().unwrap().on,
            ProductsByIdsNodesOn::Product(_)
        ));
    }
}
