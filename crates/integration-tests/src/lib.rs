//! Integration tests for Bundle Builder.
//!
//! Every test stands up a `wiremock` server in place of the Shopify Admin
//! GraphQL endpoint, so no real store or network access is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bundle-builder-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `bundle_catalog` - catalog reads and bundle resolution
//! - `bundle_creation` - the create flow and its validation
//! - `bundle_pages` - rendered pages driven through the router

#![allow(clippy::missing_panics_doc)]

use axum::Router;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bundle_builder_admin::config::CatalogConfig;
use bundle_builder_admin::routes;
use bundle_builder_admin::services::BundleService;
use bundle_builder_admin::shopify::AdminClient;
use bundle_builder_admin::state::AppState;

/// Path the mock Admin API answers on.
pub const GRAPHQL_PATH: &str = "/admin/api/2026-01/graphql.json";

/// Access token sent by test clients.
pub const TEST_TOKEN: &str = "shpat_test_token";

/// Product gid for a numeric id.
#[must_use]
pub fn gid(n: u64) -> String {
    format!("gid://shopify/Product/{n}")
}

/// A catalog product fixture: `(numeric id, title, amount)`.
pub type ProductFixture<'a> = (u64, &'a str, &'a str);

/// A bundle product fixture with its raw metafield value.
pub struct BundleFixture<'a> {
    pub id: u64,
    pub title: &'a str,
    pub description: &'a str,
    pub metafield: Option<&'a str>,
}

/// Client pointed at the mock server.
#[must_use]
pub fn admin_client(server: &MockServer) -> AdminClient {
    AdminClient::with_endpoint(
        format!("{}{GRAPHQL_PATH}", server.uri()),
        SecretString::from(TEST_TOKEN),
    )
}

/// Bundle service with default page size and concurrency.
#[must_use]
pub fn bundle_service(server: &MockServer) -> BundleService {
    BundleService::new(admin_client(server), CatalogConfig::default())
}

/// The bundle routes with state wired to the mock server.
#[must_use]
pub fn app(server: &MockServer) -> Router {
    routes::routes().with_state(AppState::new(admin_client(server), CatalogConfig::default()))
}

/// Metafield JSON for a list of numeric product ids.
#[must_use]
pub fn bundle_metafield(products: &[u64], discount: i64) -> String {
    json!({
        "products": products.iter().map(|n| gid(*n)).collect::<Vec<_>>(),
        "discount": discount,
    })
    .to_string()
}

// =============================================================================
// Response fixtures
// =============================================================================

fn product_node(n: u64, title: &str, amount: &str) -> Value {
    json!({
        "__typename": "Product",
        "id": gid(n),
        "title": title,
        "priceRangeV2": {
            "minVariantPrice": { "amount": amount, "currencyCode": "USD" }
        }
    })
}

/// `CatalogProducts` response body.
#[must_use]
pub fn catalog_response(products: &[ProductFixture<'_>]) -> Value {
    let edges: Vec<Value> = products
        .iter()
        .map(|(n, title, amount)| json!({ "node": product_node(*n, title, amount) }))
        .collect();
    json!({ "data": { "products": { "edges": edges } } })
}

/// `BundleProducts` response body.
#[must_use]
pub fn bundle_products_response(bundles: &[BundleFixture<'_>]) -> Value {
    let edges: Vec<Value> = bundles
        .iter()
        .map(|b| {
            let metafield = b.metafield.map(|value| json!({ "value": value }));
            json!({
                "node": {
                    "id": gid(b.id),
                    "title": b.title,
                    "description": b.description,
                    "metafield": metafield,
                }
            })
        })
        .collect();
    json!({ "data": { "products": { "edges": edges } } })
}

/// `ProductsByIds` response body. `None` entries are ids that no longer exist.
#[must_use]
pub fn nodes_response(nodes: &[Option<ProductFixture<'_>>]) -> Value {
    let nodes: Vec<Value> = nodes
        .iter()
        .map(|node| match node {
            Some((n, title, amount)) => product_node(*n, title, amount),
            None => Value::Null,
        })
        .collect();
    json!({ "data": { "nodes": nodes } })
}

/// Successful `BundleProductCreate` response body.
#[must_use]
pub fn created_response(n: u64, title: &str) -> Value {
    json!({
        "data": {
            "productCreate": {
                "product": { "id": gid(n), "title": title },
                "userErrors": []
            }
        }
    })
}

/// `BundleProductCreate` response body carrying user errors.
#[must_use]
pub fn user_errors_response(messages: &[&str]) -> Value {
    let errors: Vec<Value> = messages
        .iter()
        .map(|message| json!({ "field": ["title"], "message": message }))
        .collect();
    json!({
        "data": {
            "productCreate": { "product": null, "userErrors": errors }
        }
    })
}

// =============================================================================
// Mocks
// =============================================================================

/// Matcher for one named GraphQL operation.
#[must_use]
pub fn operation(name: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", TEST_TOKEN))
        .and(body_partial_json(json!({ "operationName": name })))
}

/// Answer `CatalogProducts` with the given products.
pub async fn mount_catalog(server: &MockServer, products: &[ProductFixture<'_>]) {
    operation("CatalogProducts")
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog_response(products)))
        .mount(server)
        .await;
}

/// Answer `BundleProducts` with the given bundles.
pub async fn mount_bundles(server: &MockServer, bundles: &[BundleFixture<'_>]) {
    operation("BundleProducts")
        .respond_with(ResponseTemplate::new(200).set_body_json(bundle_products_response(bundles)))
        .mount(server)
        .await;
}

/// Answer `ProductsByIds` for exactly `ids` with the given nodes.
pub async fn mount_nodes(server: &MockServer, ids: &[u64], nodes: &[Option<ProductFixture<'_>>]) {
    let ids: Vec<String> = ids.iter().map(|n| gid(*n)).collect();
    operation("ProductsByIds")
        .and(body_partial_json(json!({ "variables": { "ids": ids } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(nodes_response(nodes)))
        .mount(server)
        .await;
}
