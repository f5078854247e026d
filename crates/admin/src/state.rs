//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{AdminConfig, CatalogConfig};
use crate::services::BundleService;
use crate::shopify::AdminClient;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    bundles: BundleService,
}

impl AppState {
    /// Build state from loaded configuration.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(AdminClient::new(&config.shopify), config.catalog)
    }

    /// Build state around an existing Admin API client.
    #[must_use]
    pub fn new(shopify: AdminClient, catalog: CatalogConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                bundles: BundleService::new(shopify, catalog),
            }),
        }
    }

    /// Bundle service.
    #[must_use]
    pub fn bundles(&self) -> &BundleService {
        &self.inner.bundles
    }
}
