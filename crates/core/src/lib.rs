//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across the Bazaar storefront
//! components:
//! - `storefront` - Visitor-facing marketplace front-end service
//! - `integration-tests` - End-to-end checkout flow tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, contact data,
//!   and the marketplace's status/method enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
