//! Newtype IDs for Shopify global ids.
//!
//! Shopify identifies every resource with an opaque global id string such as
//! `gid://shopify/Product/123`. Use the `define_gid!` macro to create
//! type-safe wrappers that prevent accidentally mixing ids from different
//! resource types.

/// Macro to define a type-safe Shopify global id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `from_numeric()`, `as_str()`, `numeric()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use bundle_builder_core::define_gid;
/// define_gid!(CollectionId, "Collection");
///
/// let id = CollectionId::from_numeric(42);
/// assert_eq!(id.as_str(), "gid://shopify/Collection/42");
/// assert_eq!(id.numeric(), Some("42"));
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Shopify resource name used in the gid path.
            pub const RESOURCE: &'static str = $resource;

            /// Wrap an id string as returned by the API.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Build a gid from a numeric legacy resource id.
            #[must_use]
            pub fn from_numeric(id: u64) -> Self {
                Self(format!("gid://shopify/{}/{id}", Self::RESOURCE))
            }

            /// Get the underlying gid string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// The trailing numeric segment of the gid, if present.
            #[must_use]
            pub fn numeric(&self) -> Option<&str> {
                self.0
                    .rsplit('/')
                    .next()
                    .filter(|tail| !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()))
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId, "Product");
