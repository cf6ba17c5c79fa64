//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::marketplace::{MarketplaceClient, MarketplaceError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the typed
/// client for the marketplace backend.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    marketplace: MarketplaceClient,
}

impl AppState {
    /// Create the application state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client fails to build.
    pub fn new(config: StorefrontConfig) -> Result<Self, MarketplaceError> {
        let marketplace = MarketplaceClient::new(&config.marketplace)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                marketplace,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the marketplace backend client.
    #[must_use]
    pub fn marketplace(&self) -> &MarketplaceClient {
        &self.inner.marketplace
    }
}
