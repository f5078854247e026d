//! Integration tests for the rendered bundle pages.
//!
//! Requests go through the real router with `tower::ServiceExt::oneshot`;
//! Shopify is a `wiremock` server.

#![allow(clippy::unwrap_used)]

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wiremock::{MockServer, ResponseTemplate};

use bundle_builder_integration_tests::{
    BundleFixture, app, bundle_metafield, created_response, mount_bundles, mount_catalog,
    mount_nodes, operation, user_errors_response,
};

const GID_1: &str = "gid%3A%2F%2Fshopify%2FProduct%2F1";
const GID_2: &str = "gid%3A%2F%2Fshopify%2FProduct%2F2";
const SELECTED_1_2: &str = "gid%3A%2F%2Fshopify%2FProduct%2F1%2Cgid%3A%2F%2Fshopify%2FProduct%2F2";

/// Catalog of two products and one bundle built from both.
async fn seeded_server() -> MockServer {
    let server = MockServer::start().await;
    let metafield = bundle_metafield(&[1, 2], 10);
    mount_catalog(&server, &[(1, "Tee", "10.00"), (2, "Tank", "20.00")]).await;
    mount_bundles(
        &server,
        &[BundleFixture {
            id: 100,
            title: "Tee Duo",
            description: "Two tees",
            metafield: Some(&metafield),
        }],
    )
    .await;
    mount_nodes(
        &server,
        &[1, 2],
        &[Some((1, "Tee", "10.00")), Some((2, "Tank", "20.00"))],
    )
    .await;
    server
}

async fn get(server: &MockServer, uri: &str) -> (StatusCode, String) {
    let response = app(server)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(server: &MockServer, form: &str) -> axum::response::Response {
    app(server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/bundles")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Creator page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_redirects_to_creator() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/bundles");
}

#[tokio::test]
async fn creator_page_lists_products_and_bundles() {
    let server = seeded_server().await;

    let (status, html) = get(&server, "/bundles").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Tank"));
    assert!(html.contains("$20.00"));
    assert!(html.contains("Tee Duo"));
    assert!(html.contains("$27.00"));
}

#[tokio::test]
async fn selected_products_are_priced_in_the_form() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[(1, "Tee", "10.00"), (2, "Tank", "20.00")]).await;
    mount_bundles(&server, &[]).await;

    let uri = format!("/bundles?name=Duo&discount=20&selected={SELECTED_1_2}");
    let (status, html) = get(&server, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("$30.00"));
    assert!(html.contains("$24.00"));
}

#[tokio::test]
async fn add_appends_to_selection_and_reprices() {
    let server = seeded_server().await;

    let uri = format!("/bundles?name=Duo&discount=20&selected={GID_1}&add={GID_2}");
    let (status, html) = get(&server, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Selected products (2)"));
    assert!(html.contains("$24.00"));
}

#[tokio::test]
async fn remove_drops_row_from_selection() {
    let server = seeded_server().await;

    let uri = format!("/bundles?name=Duo&discount=20&selected={SELECTED_1_2}&remove={GID_1}");
    let (status, html) = get(&server, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Selected products (1)"));
    assert!(html.contains("$16.00"));
    assert!(!html.contains(r#"formaction="/bundles" disabled"#));
}

#[tokio::test]
async fn removing_last_product_disables_create() {
    let server = seeded_server().await;

    let uri = format!("/bundles?name=Duo&discount=10&selected={GID_1}&remove={GID_1}");
    let (status, html) = get(&server, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Selected products (0)"));
    assert!(html.contains(r#"formaction="/bundles" disabled>Create bundle"#));
}

#[tokio::test]
async fn creator_view_opens_details_and_keeps_draft() {
    let server = seeded_server().await;

    let uri = format!(
        "/bundles?name=Duo&discount=15&selected={GID_1}&view=gid%3A%2F%2Fshopify%2FProduct%2F100"
    );
    let (status, html) = get(&server, &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Two tees"));

    // The modal closes back to the same draft
    let close = html.find(">Close</a>").unwrap();
    let href_start = html[..close].rfind("href=\"").unwrap();
    let close_href = &html[href_start..close];
    assert!(close_href.contains("name=Duo"), "got: {close_href}");
    assert!(close_href.contains("discount=15"), "got: {close_href}");
    assert!(close_href.contains(&format!("selected={GID_1}")), "got: {close_href}");
    assert!(!close_href.contains("view="), "got: {close_href}");
}

#[tokio::test]
async fn creator_unknown_view_is_not_found() {
    let server = seeded_server().await;

    let (status, _) = get(
        &server,
        "/bundles?name=Duo&view=gid%3A%2F%2Fshopify%2FProduct%2F999",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shopify_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    operation("CatalogProducts")
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (status, body) = get(&server, "/bundles").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "External service error");
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_redirects_with_created_title() {
    let server = MockServer::start().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(500, "Duo Pack")))
        .expect(1)
        .mount(&server)
        .await;

    let form = format!("name=Duo+Pack&description=&discount=10&selected={SELECTED_1_2}");
    let response = post_form(&server, &form).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/bundles?created=Duo%20Pack"
    );
}

#[tokio::test]
async fn create_without_products_rerenders_with_message() {
    let server = seeded_server().await;
    operation("BundleProductCreate")
        .respond_with(ResponseTemplate::new(200).set_body_json(created_response(1, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let response = post_form(&server, "name=Duo&discount=10&selected=").await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Select at least one product for the bundle"));
    assert!(html.contains("Tee Duo"));
}

#[tokio::test]
async fn create_user_error_is_shown() {
    let server = seeded_server().await;
    operation("BundleProductCreate")
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_errors_response(&["Title has already been taken"])),
        )
        .mount(&server)
        .await;

    let form = format!("name=Tee+Duo&discount=10&selected={SELECTED_1_2}");
    let response = post_form(&server, &form).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Title has already been taken"));
}

// ---------------------------------------------------------------------------
// List page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_page_renders_bundles() {
    let server = seeded_server().await;

    let (status, html) = get(&server, "/bundles/list").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Tee Duo"));
    assert!(html.contains("$30.00"));
    assert!(html.contains("$27.00"));
}

#[tokio::test]
async fn list_page_shows_bundle_details() {
    let server = seeded_server().await;

    let (status, html) = get(
        &server,
        "/bundles/list?view=gid%3A%2F%2Fshopify%2FProduct%2F100",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Two tees"));
    assert!(html.contains("Tank"));
}

#[tokio::test]
async fn unknown_bundle_view_is_not_found() {
    let server = seeded_server().await;

    let (status, _) = get(
        &server,
        "/bundles/list?view=gid%3A%2F%2Fshopify%2FProduct%2F999",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
