//! HTTP route handlers for the storefront.
//!
//! Every page renders as a JSON view model that embeds the resolved
//! interface language and any queued notices, so the client shell can
//! show toasts after a redirect.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//!
//! # Auth
//! GET  /login                   - Login page
//! POST /login                   - Login action
//! GET  /register                - Registration page (?role= seeds the default)
//! POST /register                - Registration action
//! POST /logout                  - Logout action
//!
//! # Catalog
//! GET  /products                - Product listing (category, search, sort_by, limit)
//! GET  /product/{id}            - Product detail
//! GET  /search/suggestions      - Typeahead suggestions (q, limit)
//!
//! # Favorites / Comparison
//! GET  /favorites               - Favorites page
//! POST /favorites/{product_id}/toggle   - Toggle membership
//! GET  /comparison              - Comparison page
//! POST /comparison/{product_id}/toggle  - Toggle membership
//!
//! # Cart
//! GET  /cart                    - Cart page (lines hydrated from the catalog)
//! POST /cart/items              - Add item {product_id, quantity}
//! POST /cart/items/{product_id} - Set quantity (0 removes)
//! POST /cart/items/{product_id}/remove - Remove line
//!
//! # Checkout
//! GET  /checkout                - Checkout page
//! POST /checkout/recipient      - Update one recipient field {field, value}
//! POST /checkout/delivery       - Select delivery method / NP city + branch
//! POST /checkout/payment        - Select payment method
//! POST /checkout/place-order    - Run the place-order saga
//! GET  /checkout/success        - Post-order success page
//! GET  /checkout/cancel         - Payment cancelled, back to the cart
//!
//! # Payment
//! GET  /payment/resume/{order_id} - Reopen a payment session for a pending order
//!
//! # Delivery lookups
//! GET  /delivery/cities         - Settlement search (query, limit)
//! GET  /delivery/warehouses     - Branch search (city_ref, number)
//!
//! # Account
//! GET  /profile                 - Profile + order history (requires auth)
//! GET  /seller/dashboard        - Seller dashboard (requires seller role)
//! GET  /admin                   - Admin panel (requires admin role)
//!
//! # Misc
//! GET  /language                - Current interface language
//! POST /language                - Persist `ua`/`ru` selection
//! GET  /contact, /delivery-payment, /exchange-return, /about, /terms
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod comparison;
pub mod content;
pub mod delivery;
pub mod favorites;
pub mod home;
pub mod language;
pub mod payment;
pub mod products;
pub mod profile;
pub mod seller;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_sessions::Session;

use bazaar_core::Language;

use crate::models::session::{self, Notice};
use crate::state::AppState;

/// Interface language and drained notices, embedded in every page view.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub language: Language,
    pub notices: Vec<Notice>,
}

impl PageMeta {
    /// Resolve the interface language and drain queued notices.
    pub async fn load(session: &Session) -> Self {
        Self {
            language: session::language(session).await,
            notices: session::take_notices(session).await,
        }
    }
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/product/{id}", get(products::show))
        .route("/search/suggestions", get(products::suggestions))
}

/// Create the favorites and comparison routes router.
pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(favorites::index))
        .route("/favorites/{product_id}/toggle", post(favorites::toggle))
        .route("/comparison", get(comparison::index))
        .route("/comparison/{product_id}/toggle", post(comparison::toggle))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/{product_id}", post(cart::set_quantity))
        .route("/items/{product_id}/remove", post(cart::remove))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/recipient", post(checkout::update_recipient))
        .route("/delivery", post(checkout::select_delivery))
        .route("/payment", post(checkout::select_payment))
        .route("/place-order", post(checkout::place_order))
        .route("/success", get(checkout::success))
        .route("/cancel", get(checkout::cancel))
}

/// Create the delivery lookup routes router.
pub fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/cities", get(delivery::cities))
        .route("/warehouses", get(delivery::warehouses))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::show))
        .route("/seller/dashboard", get(seller::dashboard))
        .route("/admin", get(admin::panel))
}

/// Create the static content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", get(content::contact))
        .route("/delivery-payment", get(content::delivery_payment))
        .route("/exchange-return", get(content::exchange_return))
        .route("/about", get(content::about))
        .route("/terms", get(content::terms))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Auth pages
        .merge(auth_routes())
        // Catalog pages
        .merge(catalog_routes())
        // Favorites / comparison
        .merge(list_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout routes
        .nest("/checkout", checkout_routes())
        // Payment resume
        .route("/payment/resume/{order_id}", get(payment::resume))
        // Delivery lookups
        .nest("/delivery", delivery_routes())
        // Account pages
        .merge(account_routes())
        // Interface language
        .route("/language", get(language::show).post(language::set))
        // Info pages
        .merge(content_routes())
}
