//! Business logic services for admin.
//!
//! # Services
//!
//! - `bundles` - Catalog reads, bundle resolution and bundle creation

pub mod bundles;

pub use bundles::{
    BundleCatalog, BundleCreateError, BundleResolution, BundleService, ResolvedBundle,
    UnresolvedBundle, displayable,
};
