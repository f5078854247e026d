//! Shopify Admin API client.
//!
//! # Security
//!
//! The client holds the store's Admin API access token. The bundle pages only
//! read products and create bundle products, but the token itself usually
//! carries wider `write_products` scope, so keep it out of logs.
//!
//! # Architecture
//!
//! - Operations implement `graphql_client::GraphQLQuery` so every call goes
//!   through one typed `execute` path
//! - Direct API calls to Shopify (no local database sync)
//! - Exactly four operation shapes: catalog products, bundle products,
//!   products by id, and bundle product creation
//!
//! # Example
//!
//! ```rust,ignore
//! use bundle_builder_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify);
//!
//! // First page of products that are not bundles
//! let products = client.list_catalog_products(20).await?;
//!
//! // Resolve bundle members
//! let members = client.get_products_by_ids(&ids).await?;
//! ```

mod admin;
pub mod types;

pub use admin::{AdminClient, queries};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User error from mutation (e.g., invalid input).
    #[error("User error: {0}")]
    UserError(String),
}

impl AdminShopifyError {
    /// Message suitable for showing to the merchant.
    ///
    /// Mutation user errors are shown verbatim; everything else keeps its
    /// full display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UserError(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
