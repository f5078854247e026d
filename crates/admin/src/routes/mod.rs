//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (mounted in main)
//!
//! GET  /                       - Redirect to /bundles
//!
//! # Bundles
//! GET  /bundles                - Bundle creator with bundle list
//!                                (?add=, ?remove=, ?view= actions)
//! POST /bundles                - Create bundle
//! GET  /bundles/list           - Bundle list only (?view= for details)
//! ```

use axum::{Router, routing::get};

use crate::state::AppState;

pub mod bundles;

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bundles::root))
        .route("/bundles", get(bundles::index).post(bundles::create))
        .route("/bundles/list", get(bundles::list))
}
