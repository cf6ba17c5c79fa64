//! In-process integration harness for the Bazaar storefront.
//!
//! Each test boots two servers on ephemeral ports: a stub marketplace
//! backend that records everything the storefront sends it, and the real
//! storefront router wired to that stub. Tests then drive the storefront
//! over HTTP with a cookie-carrying client, the way a browser session
//! would.
//!
//! ```rust,ignore
//! let app = TestApp::spawn().await;
//! let client = client();
//!
//! add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
//! let cart = get_json(&client, &app.url("/cart")).await;
//! assert_eq!(cart["item_count"], 1);
//! ```
//!
//! Run with: `cargo test -p bazaar-integration-tests`

#![allow(clippy::missing_panics_doc)]

pub mod stub;

use std::net::Ipv4Addr;
use std::sync::Arc;

use axum::Router;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

use bazaar_storefront::config::{MarketplaceConfig, StorefrontConfig};
use bazaar_storefront::middleware::create_session_layer;
use bazaar_storefront::routes;
use bazaar_storefront::state::AppState;

pub use stub::{
    BUYER_EMAIL, BUYER_ID, BUYER_PASSWORD, BUYER_TOKEN, COFFEE_MAKER_ID, COFFEE_MAKER_PRICE,
    CapturedOrder, HEADPHONES_ID, HEADPHONES_PRICE, NP_BRANCH_ADDRESS, NP_BRANCH_NUMBER,
    NP_BRANCH_REF, PENDING_ORDER_AMOUNT, PENDING_ORDER_ID, PENDING_ORDER_NUMBER, SELLER_EMAIL,
    SELLER_PASSWORD, SELLER_TOKEN, StubBackend, TAKEN_EMAIL,
};

/// A storefront instance under test, plus the stub backend behind it.
pub struct TestApp {
    /// Storefront base URL.
    pub address: String,
    /// Stub backend recordings and failure switches.
    pub backend: Arc<StubBackend>,
}

impl TestApp {
    /// Boot the stub backend and the storefront on ephemeral ports.
    pub async fn spawn() -> Self {
        let backend = Arc::new(StubBackend::default());

        let backend_listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("failed to bind stub backend port");
        let backend_addr = backend_listener
            .local_addr()
            .expect("stub backend has no local address");
        let stub = stub::stub_router(Arc::clone(&backend));
        tokio::spawn(async move {
            axum::serve(backend_listener, stub)
                .await
                .expect("stub backend exited");
        });

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("failed to bind storefront port");
        let addr = listener
            .local_addr()
            .expect("storefront has no local address");

        let config = StorefrontConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: format!("http://{addr}"),
            session_secret: SecretString::from("integration-test-secret".to_string()),
            marketplace: MarketplaceConfig {
                api_url: Url::parse(&format!("http://{backend_addr}"))
                    .expect("stub backend address is not a valid URL"),
                timeout_secs: 5,
            },
            sentry_dsn: None,
            sentry_environment: "test".to_string(),
            sentry_traces_sample_rate: 0.0,
        };

        let session_layer = create_session_layer(&config);
        let state = AppState::new(config).expect("failed to build application state");
        let router = Router::new()
            .merge(routes::routes())
            .layer(session_layer)
            .with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("storefront exited");
        });

        Self {
            address: format!("http://{addr}"),
            backend,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }
}

/// Cookie-carrying HTTP client that does not follow redirects, so tests
/// can assert on `Location` headers.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("failed to build HTTP client")
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> String {
    resp.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// GET a storefront page and decode the JSON view.
pub async fn get_json(client: &reqwest::Client, url: &str) -> Value {
    let resp = client.get(url).send().await.expect("request failed");
    assert!(
        resp.status().is_success(),
        "GET {url} returned {}",
        resp.status()
    );
    resp.json().await.expect("response was not JSON")
}

/// POST a JSON body to a storefront path and decode the JSON view.
pub async fn post_json(client: &reqwest::Client, url: &str, body: &Value) -> Value {
    let resp = client
        .post(url)
        .json(body)
        .send()
        .await
        .expect("request failed");
    assert!(
        resp.status().is_success(),
        "POST {url} returned {}",
        resp.status()
    );
    resp.json().await.expect("response was not JSON")
}

/// Put `quantity` of a catalog product in the session cart.
pub async fn add_to_cart(
    client: &reqwest::Client,
    app: &TestApp,
    product_id: &str,
    quantity: u32,
) -> Value {
    post_json(
        client,
        &app.url("/cart/items"),
        &json!({ "product_id": product_id, "quantity": quantity }),
    )
    .await
}

/// Fill every recipient field through the per-field endpoint, the way the
/// client shell does.
pub async fn fill_recipient(client: &reqwest::Client, app: &TestApp) {
    for (field, value) in [
        ("firstName", "Оксана"),
        ("lastName", "Петренко"),
        ("phone", "+380501234567"),
        ("email", "oksana@example.com"),
        ("city", "Київ"),
        ("address", "вул. Хрещатик 1"),
    ] {
        post_json(
            client,
            &app.url("/checkout/recipient"),
            &json!({ "field": field, "value": value }),
        )
        .await;
    }
}

/// Select Nova Poshta delivery with the stub's fixture branch.
pub async fn select_nova_poshta(client: &reqwest::Client, app: &TestApp) -> Value {
    post_json(
        client,
        &app.url("/checkout/delivery"),
        &json!({
            "method": "nova-poshta",
            "city": "Київ",
            "warehouse": {
                "warehouse_ref": NP_BRANCH_REF,
                "number": NP_BRANCH_NUMBER,
                "address": NP_BRANCH_ADDRESS,
            },
        }),
    )
    .await
}

/// Submit the order form. Returns the redirect without following it.
pub async fn place_order(client: &reqwest::Client, app: &TestApp) -> reqwest::Response {
    client
        .post(app.url("/checkout/place-order"))
        .send()
        .await
        .expect("place-order request failed")
}

/// Log in through the form endpoint. Returns the redirect without
/// following it.
pub async fn sign_in(
    client: &reqwest::Client,
    app: &TestApp,
    email: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(app.url("/login"))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("login request failed")
}

/// Decode a money amount serialized as a JSON string.
#[must_use]
pub fn parse_decimal(value: &Value) -> Decimal {
    value
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| panic!("not a decimal string: {value}"))
}
