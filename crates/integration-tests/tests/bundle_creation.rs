//! Integration tests for the bundle creation flow.
//!
//! Drafts are validated before any request, so the rejection tests mount
//! the mutation with `.expect(0)` and let `wiremock` verify nothing was sent.

#![allow(clippy::unwrap_used)]

use serde_json::{Value, json};
use wiremock::{MockServer, ResponseTemplate};

use bundle_builder_admin::services::BundleCreateError;
use bundle_builder_admin::shopify::AdminShopifyError;
use bundle_builder_core::{BundleDraft, DraftError, ProductId};
use bundle_builder_integration_tests::{
    bundle_service, created_response, gid, operation, user_errors_response,
};

fn draft(name: &str, products: &[u64], discount: i64) -> BundleDraft {
    BundleDraft {
        name: name.to_string(),
        description: Some("Two tees for summer".to_string()),
        product_ids: products.iter().map(|n| ProductId::from_numeric(*n)).collect(),
        discount,
    }
}

/// Body of the single mutation request the server received.
async fn mutation_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    let mutation: Vec<_> = requests
        .iter()
        .filter_map(|r| r.body_json::<Value>().ok())
        .filter(|body| body["operationName"] == "BundleProductCreate")
        .collect();
    assert_eq!(mutation.len(), 1, "expected exactly one productCreate call");
    mutation[0].clone()
}

#[tokio::test]
async fn create_sends_tag_status_and_metafield() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(500, "Tee Duo")))
        .expect(1)
        .mount(&server)
        .await;

    let created = bundle_service(&server)
        .create_bundle(draft("  Tee Duo ", &[1, 2], 15))
        .await
        .unwrap();

    assert_eq!(created.id, ProductId::from_numeric(500));
    assert_eq!(created.title, "Tee Duo");

    let body = mutation_body(&server).await;
    let product = &body["variables"]["product"];
    assert_eq!(product["title"], "Tee Duo");
    assert_eq!(product["descriptionHtml"], "Two tees for summer");
    assert_eq!(product["tags"], json!(["bundle"]));
    assert_eq!(product["status"], "ACTIVE");

    let metafield = &product["metafields"][0];
    assert_eq!(metafield["namespace"], "bundle_builder");
    assert_eq!(metafield["key"], "bundle_data");
    assert_eq!(metafield["type"], "json");

    let stored: Value = serde_json::from_str(metafield["value"].as_str().unwrap()).unwrap();
    assert_eq!(
        stored,
        json!({ "products": [gid(1), gid(2)], "discount": 15 })
    );
}

#[tokio::test]
async fn blank_description_is_sent_as_null() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(501, "Solo")))
        .mount(&server)
        .await;

    let mut solo = draft("Solo", &[3], 10);
    solo.description = Some("   ".to_string());
    bundle_service(&server).create_bundle(solo).await.unwrap();

    let body = mutation_body(&server).await;
    assert!(body["variables"]["product"]["descriptionHtml"].is_null());
}

#[tokio::test]
async fn duplicate_selection_is_stored_as_is() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(502, "Twins")))
        .mount(&server)
        .await;

    bundle_service(&server)
        .create_bundle(draft("Twins", &[4, 4], 5))
        .await
        .unwrap();

    let body = mutation_body(&server).await;
    let value = body["variables"]["product"]["metafields"][0]["value"]
        .as_str()
        .unwrap()
        .to_string();
    let stored: Value = serde_json::from_str(&value).unwrap();
    assert_eq!(stored["products"], json!([gid(4), gid(4)]));
}

#[tokio::test]
async fn empty_selection_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(1, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let err = bundle_service(&server)
        .create_bundle(draft("Nothing", &[], 10))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BundleCreateError::Invalid(DraftError::NoProducts)
    ));
}

#[tokio::test]
async fn blank_name_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(1, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let err = bundle_service(&server)
        .create_bundle(draft("   ", &[1], 10))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BundleCreateError::Invalid(DraftError::MissingName)
    ));
    assert_eq!(err.user_message(), "Bundle name is required");
}

#[tokio::test]
async fn first_user_error_is_surfaced() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(user_errors_response(&[
            "Title has already been taken",
            "Handle is invalid",
        ])))
        .mount(&server)
        .await;

    let err = bundle_service(&server)
        .create_bundle(draft("Tee Duo", &[1], 10))
        .await
        .unwrap_err();

    assert!(matches!(
        &err,
        BundleCreateError::Shopify(AdminShopifyError::UserError(m)) if m == "Title has already been taken"
    ));
    assert_eq!(err.user_message(), "Title has already been taken");
}

#[tokio::test]
async fn server_failure_is_a_shopify_error() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = bundle_service(&server)
        .create_bundle(draft("Tee Duo", &[1], 10))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BundleCreateError::Shopify(AdminShopifyError::Http(_))
    ));
}
