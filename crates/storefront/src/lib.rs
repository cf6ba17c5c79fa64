//! Bazaar Storefront library.
//!
//! The buyer-facing half of the marketplace: JSON page views, session cart
//! and checkout, and a typed client for the backend REST API. Exposed as a
//! library so the integration tests can assemble the router in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod i18n;
pub mod marketplace;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
