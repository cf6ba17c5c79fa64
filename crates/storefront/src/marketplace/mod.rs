//! Marketplace backend REST API client.
//!
//! # Architecture
//!
//! - Typed `reqwest` client over the backend's JSON REST API
//! - The backend is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog and delivery lookups (5 minute TTL)
//! - Per-user auth via bearer tokens issued by the login endpoint
//!
//! Monetary amounts travel as JSON strings to preserve decimal precision.
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_storefront::marketplace::MarketplaceClient;
//!
//! let client = MarketplaceClient::new(&config.marketplace)?;
//!
//! // Browse the catalog
//! let product = client.get_product(&product_id).await?;
//!
//! // Place an order for an authenticated buyer
//! let order = client.create_order(&payload, Some(&token)).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::MarketplaceClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the marketplace backend.
#[derive(Debug, Error)]
pub enum MarketplaceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl MarketplaceError {
    /// Whether the backend reported the resource as missing.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
