//! Marketplace REST API client implementation.
//!
//! Uses `reqwest` 0.13 for HTTP. Catalog reads and delivery lookups are
//! cached with `moka` (5-minute TTL); auth, order, and payment calls always
//! go to the backend.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use bazaar_core::{CityRef, OrderId, ProductId};

use crate::config::MarketplaceConfig;
use crate::marketplace::MarketplaceError;
use crate::marketplace::cache::CacheValue;
use crate::marketplace::types::{
    AdminStats, AuthResponse, AuthUser, Category, CitySuggestion, CustomSection, LoginRequest,
    Order, OrderPayload, PaymentSession, PaymentSessionRequest, PopularCategory, Product,
    ProductQuery, RegisterRequest, SearchSuggestion, SellerStats, Warehouse,
};

/// Minimum query length for typeahead lookups; shorter input returns no rows.
const MIN_LOOKUP_LENGTH: usize = 2;

// =============================================================================
// MarketplaceClient
// =============================================================================

/// Client for the marketplace backend REST API.
///
/// Cheap to clone; all clones share one connection pool and cache.
#[derive(Clone)]
pub struct MarketplaceClient {
    inner: Arc<MarketplaceClientInner>,
}

struct MarketplaceClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl MarketplaceClient {
    /// Create a new marketplace API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MarketplaceConfig) -> Result<Self, MarketplaceError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config.api_url.as_str().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(MarketplaceClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// Build the full URL for a backend API path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/api{}", self.inner.base_url, path)
    }

    /// Execute a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, MarketplaceError> {
        let mut request = self.inner.client.get(self.endpoint(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode_response(request.send().await?).await
    }

    /// Execute a GET request with query parameters and decode the JSON body.
    async fn get_json_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        token: Option<&str>,
    ) -> Result<T, MarketplaceError> {
        let mut request = self.inner.client.get(self.endpoint(path)).query(query);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode_response(request.send().await?).await
    }

    /// Execute a POST request with a JSON body and decode the response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, MarketplaceError> {
        let mut request = self.inner.client.post(self.endpoint(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode_response(request.send().await?).await
    }

    // ===== Auth Methods =====

    /// Log a user in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::Api` with status 401 on bad credentials.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, MarketplaceError> {
        self.post_json("/auth/login", credentials, None).await
    }

    /// Register a new customer or seller account.
    ///
    /// # Errors
    ///
    /// Returns `MarketplaceError::Api` with status 409 when the email is taken.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, MarketplaceError> {
        self.post_json("/auth/register", request, None).await
    }

    /// Fetch the account behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns error if the token is expired or the request fails.
    #[instrument(skip_all)]
    pub async fn current_user(&self, token: &str) -> Result<AuthUser, MarketplaceError> {
        self.get_json("/auth/me", Some(token)).await
    }

    // ===== Catalog Methods =====

    /// Get a single product by ID. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error on transport failures or non-404 backend errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Option<Product>, MarketplaceError> {
        let cache_key = format!("product:{product_id}");
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product: {product_id}");
            return Ok(Some(*product));
        }

        let path = format!("/products/{}", urlencoding::encode(product_id.as_str()));
        match self.get_json::<Product>(&path, None).await {
            Ok(product) => {
                self.inner
                    .cache
                    .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
                    .await;
                Ok(Some(product))
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// List products matching a catalog query.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, query))]
    pub async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, MarketplaceError> {
        let cache_key = format!("products:{query:?}");
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product listing");
            return Ok(products);
        }

        let products: Vec<Product> = self
            .get_json_with_query("/products", query, None)
            .await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// List all catalog categories.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, MarketplaceError> {
        let cache_key = "categories".to_string();
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("/categories", None).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Categories curated for the home page.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn popular_categories(&self) -> Result<Vec<PopularCategory>, MarketplaceError> {
        let cache_key = "popular-categories".to_string();
        if let Some(CacheValue::PopularCategories(categories)) =
            self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for popular categories");
            return Ok(categories);
        }

        let categories: Vec<PopularCategory> =
            self.get_json("/popular-categories", None).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::PopularCategories(categories.clone()))
            .await;
        Ok(categories)
    }

    /// Admin-configured merchandising strips for the home page.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn custom_sections(&self) -> Result<Vec<CustomSection>, MarketplaceError> {
        let cache_key = "custom-sections".to_string();
        if let Some(CacheValue::Sections(sections)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for custom sections");
            return Ok(sections);
        }

        let sections: Vec<CustomSection> = self.get_json("/custom-sections", None).await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Sections(sections.clone()))
            .await;
        Ok(sections)
    }

    /// Typeahead suggestions for the search bar.
    ///
    /// Queries shorter than two characters return no rows without hitting
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn search_suggestions(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<SearchSuggestion>, MarketplaceError> {
        if query.chars().count() < MIN_LOOKUP_LENGTH {
            return Ok(Vec::new());
        }

        self.get_json_with_query(
            "/products/search/suggestions",
            &[("q", query.to_string()), ("limit", limit.to_string())],
            None,
        )
        .await
    }

    // ===== Order Methods =====

    /// Submit a new order.
    ///
    /// The backend assigns the durable order ID; `order_number` in the
    /// payload is the client-side correlation key.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the payload or the request fails.
    #[instrument(skip(self, payload, token), fields(order_number = %payload.order_number))]
    pub async fn create_order(
        &self,
        payload: &OrderPayload,
        token: Option<&str>,
    ) -> Result<Order, MarketplaceError> {
        self.post_json("/orders", payload, token).await
    }

    /// Get a single order by backend ID. Returns `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns error on transport failures or non-404 backend errors.
    #[instrument(skip(self, token), fields(order_id = %order_id))]
    pub async fn get_order(
        &self,
        order_id: &OrderId,
        token: Option<&str>,
    ) -> Result<Option<Order>, MarketplaceError> {
        let path = format!("/orders/{}", urlencoding::encode(order_id.as_str()));
        match self.get_json::<Order>(&path, token).await {
            Ok(order) => Ok(Some(order)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Orders placed by the authenticated buyer, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip_all)]
    pub async fn list_my_orders(&self, token: &str) -> Result<Vec<Order>, MarketplaceError> {
        self.get_json("/orders/my", Some(token)).await
    }

    // ===== Payment Methods =====

    /// Open a hosted payment session for an order.
    ///
    /// A non-2xx response is an error; a 2xx response with `success: false`
    /// carries the provider's failure reason in `error`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, request, token), fields(external_id = %request.external_id))]
    pub async fn create_payment_session(
        &self,
        request: &PaymentSessionRequest,
        token: Option<&str>,
    ) -> Result<PaymentSession, MarketplaceError> {
        self.post_json("/payment/rozetkapay/create", request, token)
            .await
    }

    // ===== Delivery Lookup Methods =====

    /// Search Nova Poshta settlements by name prefix.
    ///
    /// Queries shorter than two characters return no rows without hitting
    /// the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self))]
    pub async fn search_cities(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<CitySuggestion>, MarketplaceError> {
        if query.chars().count() < MIN_LOOKUP_LENGTH {
            return Ok(Vec::new());
        }

        let cache_key = format!("cities:{query}:{limit}");
        if let Some(CacheValue::Cities(cities)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for city search: {query}");
            return Ok(cities);
        }

        let cities: Vec<CitySuggestion> = self
            .get_json_with_query(
                "/delivery/cities",
                &[("query", query.to_string()), ("limit", limit.to_string())],
                None,
            )
            .await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Cities(cities.clone()))
            .await;
        Ok(cities)
    }

    /// List Nova Poshta branches in a settlement, optionally filtered by
    /// branch number.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self), fields(city_ref = %city_ref))]
    pub async fn list_warehouses(
        &self,
        city_ref: &CityRef,
        number: Option<&str>,
    ) -> Result<Vec<Warehouse>, MarketplaceError> {
        let cache_key = format!("warehouses:{city_ref}:{}", number.unwrap_or_default());
        if let Some(CacheValue::Warehouses(warehouses)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for warehouses: {city_ref}");
            return Ok(warehouses);
        }

        let mut query = vec![("city_ref", city_ref.as_str().to_string())];
        if let Some(number) = number {
            query.push(("number", number.to_string()));
        }

        let warehouses: Vec<Warehouse> = self
            .get_json_with_query("/delivery/warehouses", &query, None)
            .await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Warehouses(warehouses.clone()))
            .await;
        Ok(warehouses)
    }

    // ===== Dashboard Methods =====

    /// Sales aggregates for the authenticated seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip_all)]
    pub async fn seller_stats(&self, token: &str) -> Result<SellerStats, MarketplaceError> {
        self.get_json("/seller/stats", Some(token)).await
    }

    /// Products listed by the authenticated seller.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip_all)]
    pub async fn seller_products(&self, token: &str) -> Result<Vec<Product>, MarketplaceError> {
        self.get_json("/seller/products", Some(token)).await
    }

    /// Marketplace-wide aggregates for the admin panel.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip_all)]
    pub async fn admin_stats(&self, token: &str) -> Result<AdminStats, MarketplaceError> {
        self.get_json("/admin/stats", Some(token)).await
    }
}

/// Check status and decode a JSON response body.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, MarketplaceError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(MarketplaceError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| MarketplaceError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use url::Url;

    fn test_client(base: &str) -> MarketplaceClient {
        MarketplaceClient::new(&MarketplaceConfig {
            api_url: Url::parse(base).unwrap(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_building() {
        let client = test_client("http://localhost:8000");
        assert_eq!(
            client.endpoint("/products"),
            "http://localhost:8000/api/products"
        );
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = test_client("http://localhost:8000/");
        assert_eq!(
            client.endpoint("/delivery/cities"),
            "http://localhost:8000/api/delivery/cities"
        );
    }

    #[tokio::test]
    async fn test_short_city_query_skips_backend() {
        // Base URL points nowhere; the guard must return before any request
        let client = test_client("http://127.0.0.1:1");
        let cities = client.search_cities("к", 10).await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_short_suggestion_query_skips_backend() {
        let client = test_client("http://127.0.0.1:1");
        let suggestions = client.search_suggestions("a", 5).await.unwrap();
        assert!(suggestions.is_empty());
    }
}
