//! Core types for Bundle Builder.
//!
//! This module provides type-safe wrappers for Shopify domain concepts.

pub mod id;
pub mod price;

pub use id::*;
pub use price::{CurrencyCode, Price};
