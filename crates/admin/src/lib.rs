//! Bundle Builder Admin library.
//!
//! This crate provides the bundle admin pages as a library, allowing them to
//! be tested and reused.
//!
//! # Security
//!
//! This crate holds the store's Shopify Admin API access token. Only expose
//! it to store staff.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;
