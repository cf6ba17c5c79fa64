//! Stub marketplace backend.
//!
//! Serves the same `/api` surface the real backend exposes, from a small
//! fixed catalog, and records every order and payment submission so tests
//! can assert on exactly what the storefront sent.

#![allow(clippy::unused_async)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use bazaar_core::{OrderStatus, PaymentStatus};

// ===== Fixtures =====

/// Wireless headphones, flagged bestseller.
pub const HEADPHONES_ID: &str = "p-100";
pub const HEADPHONES_PRICE: &str = "1299.00";

/// Coffee maker, no bestseller flag.
pub const COFFEE_MAKER_ID: &str = "p-200";
pub const COFFEE_MAKER_PRICE: &str = "2499.50";

/// Buyer account the stub accepts at `/api/auth/login`.
pub const BUYER_EMAIL: &str = "buyer@example.com";
pub const BUYER_PASSWORD: &str = "correct-horse";
pub const BUYER_ID: &str = "u-1";
pub const BUYER_TOKEN: &str = "tok-buyer";

/// Seller account.
pub const SELLER_EMAIL: &str = "seller@example.com";
pub const SELLER_PASSWORD: &str = "battery-staple";
pub const SELLER_TOKEN: &str = "tok-seller";

/// Email `/api/auth/register` rejects with 409.
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Nova Poshta branch served by the warehouse lookup.
pub const NP_BRANCH_REF: &str = "wh-23";
pub const NP_BRANCH_NUMBER: &str = "23";
pub const NP_BRANCH_ADDRESS: &str = "Відділення №23: вул. Лугова 12";

/// Buyer order stuck awaiting its online payment, served by `/api/orders/{id}`.
pub const PENDING_ORDER_ID: &str = "bk-55";
pub const PENDING_ORDER_NUMBER: &str = "ORDER-1754900000000";
pub const PENDING_ORDER_AMOUNT: &str = "499.00";

fn catalog() -> Vec<Value> {
    vec![
        json!({
            "id": HEADPHONES_ID,
            "title": "Бездротові навушники Sonic 5",
            "price": HEADPHONES_PRICE,
            "compare_price": "1599.00",
            "short_description": "Активне шумозаглушення, 40 годин роботи",
            "images": [
                "https://img.bazaar.ua/p-100/main.jpg",
                "https://img.bazaar.ua/p-100/side.jpg",
            ],
            "category_id": "cat-electronics",
            "category_name": "Електроніка",
            "seller_id": "s-1",
            "rating": 4.7,
            "reviews_count": 214,
            "is_bestseller": true,
        }),
        json!({
            "id": COFFEE_MAKER_ID,
            "title": "Кавоварка Dnipro Brew 700",
            "price": COFFEE_MAKER_PRICE,
            "images": ["https://img.bazaar.ua/p-200/main.jpg"],
            "category_id": "cat-home",
            "category_name": "Дім",
            "seller_id": "s-2",
            "rating": 4.3,
            "reviews_count": 58,
            "is_bestseller": false,
        }),
    ]
}

/// Buyer profile with a saved address, exercised by the checkout prefill.
fn buyer_profile() -> Value {
    json!({
        "id": BUYER_ID,
        "email": BUYER_EMAIL,
        "full_name": "Оксана Петренко",
        "role": "customer",
        "phone": "380501234567",
        "city": "Київ",
        "address": "вул. Хрещатик 1, кв. 5",
        "delivery_method": "nova_poshta",
    })
}

fn seller_profile() -> Value {
    json!({
        "id": "u-7",
        "email": SELLER_EMAIL,
        "full_name": "Тарас Коваль",
        "role": "seller",
        "company_name": "Коваль Трейд",
    })
}

// ===== Recordings =====

/// One captured `POST /api/orders` submission.
#[derive(Debug, Clone)]
pub struct CapturedOrder {
    /// Bearer token the storefront attached, if any.
    pub token: Option<String>,
    /// Raw order payload.
    pub payload: Value,
}

/// Recordings and failure switches shared between the stub and the test body.
#[derive(Default)]
pub struct StubBackend {
    /// Order submissions, in arrival order. Recorded even when rejected.
    pub orders: Mutex<Vec<CapturedOrder>>,
    /// Payment session requests, in arrival order.
    pub payment_requests: Mutex<Vec<Value>>,
    /// When set, order creation returns HTTP 502.
    pub fail_orders: AtomicBool,
    /// When set, payment session creation returns HTTP 502.
    pub fail_payments: AtomicBool,
    /// Milliseconds to hold each order creation before responding.
    pub order_delay_ms: AtomicU64,
    /// Settlement lookups that reached the backend.
    pub city_lookups: AtomicUsize,
    /// Typeahead lookups that reached the backend.
    pub suggestion_lookups: AtomicUsize,
}

/// Assemble the stub router over the shared recordings.
pub fn stub_router(backend: Arc<StubBackend>) -> Router {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/search/suggestions", get(search_suggestions))
        .route("/api/categories", get(empty_list))
        .route("/api/popular-categories", get(empty_list))
        .route("/api/custom-sections", get(empty_list))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/orders", post(create_order))
        .route("/api/orders/my", get(my_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/payment/rozetkapay/create", post(create_payment))
        .route("/api/delivery/cities", get(cities))
        .route("/api/delivery/warehouses", get(warehouses))
        .route("/api/seller/stats", get(seller_stats))
        .route("/api/seller/products", get(seller_products))
        .with_state(backend)
}

// ===== Catalog =====

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let mut products = catalog();
    if let Some(search) = params.get("search") {
        let needle = search.to_lowercase();
        products.retain(|p| {
            p.get("title")
                .and_then(Value::as_str)
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        });
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        products.truncate(limit);
    }
    Json(Value::Array(products))
}

async fn get_product(Path(id): Path<String>) -> Response {
    let found = catalog()
        .into_iter()
        .find(|p| p.get("id").and_then(Value::as_str) == Some(id.as_str()));
    match found {
        Some(product) => Json(product).into_response(),
        None => (StatusCode::NOT_FOUND, "product not found").into_response(),
    }
}

async fn search_suggestions(
    State(backend): State<Arc<StubBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.suggestion_lookups.fetch_add(1, Ordering::SeqCst);
    let needle = params
        .get("q")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let suggestions: Vec<Value> = catalog()
        .into_iter()
        .filter(|p| {
            p.get("title")
                .and_then(Value::as_str)
                .is_some_and(|title| title.to_lowercase().contains(&needle))
        })
        .map(|p| {
            json!({
                "id": p.get("id").cloned().unwrap_or_default(),
                "title": p.get("title").cloned().unwrap_or_default(),
                "image": p.get("images").and_then(|images| images.get(0)).cloned(),
                "price": p.get("price").cloned(),
            })
        })
        .collect();
    Json(Value::Array(suggestions))
}

async fn empty_list() -> Json<Value> {
    Json(json!([]))
}

// ===== Auth =====

async fn login(Json(credentials): Json<Value>) -> Response {
    let email = credentials.get("email").and_then(Value::as_str);
    let password = credentials.get("password").and_then(Value::as_str);
    match (email, password) {
        (Some(BUYER_EMAIL), Some(BUYER_PASSWORD)) => {
            Json(auth_response(BUYER_TOKEN, buyer_profile())).into_response()
        }
        (Some(SELLER_EMAIL), Some(SELLER_PASSWORD)) => {
            Json(auth_response(SELLER_TOKEN, seller_profile())).into_response()
        }
        _ => (StatusCode::UNAUTHORIZED, "invalid credentials").into_response(),
    }
}

async fn register(Json(request): Json<Value>) -> Response {
    let email = request.get("email").and_then(Value::as_str).unwrap_or_default();
    if email == TAKEN_EMAIL {
        return (StatusCode::CONFLICT, "email already registered").into_response();
    }
    let user = json!({
        "id": "u-new",
        "email": email,
        "full_name": request.get("full_name").cloned().unwrap_or_default(),
        "role": request.get("role").cloned().unwrap_or_else(|| json!("customer")),
        "company_name": request.get("company_name").cloned().unwrap_or(Value::Null),
    });
    Json(auth_response("tok-new", user)).into_response()
}

async fn me(headers: HeaderMap) -> Response {
    match bearer_token(&headers) {
        Some(BUYER_TOKEN) => Json(buyer_profile()).into_response(),
        Some(SELLER_TOKEN) => Json(seller_profile()).into_response(),
        _ => (StatusCode::UNAUTHORIZED, "invalid token").into_response(),
    }
}

fn auth_response(token: &str, user: Value) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// ===== Orders & Payments =====

async fn create_order(
    State(backend): State<Arc<StubBackend>>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Response {
    let mut orders = backend.orders.lock().await;
    orders.push(CapturedOrder {
        token: bearer_token(&headers).map(ToString::to_string),
        payload: payload.clone(),
    });
    let sequence = orders.len();
    drop(orders);

    let delay = backend.order_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if backend.fail_orders.load(Ordering::SeqCst) {
        return (StatusCode::BAD_GATEWAY, "order service unavailable").into_response();
    }

    Json(json!({
        "id": format!("bk-{sequence}"),
        "order_number": payload.get("order_number").cloned().unwrap_or_default(),
        "status": OrderStatus::Pending,
        "payment_status": payload.get("payment_status").cloned().unwrap_or_default(),
        "payment_method": payload.get("payment_method").cloned(),
        "total_amount": payload.get("total_amount").cloned(),
        "currency": "UAH",
    }))
    .into_response()
}

fn delivered_order() -> Value {
    json!({
        "id": "bk-900",
        "order_number": "ORDER-1755000000000",
        "status": OrderStatus::Delivered,
        "payment_status": PaymentStatus::Paid,
        "payment_method": "online",
        "total_amount": "499.00",
        "currency": "UAH",
    })
}

fn unpaid_order() -> Value {
    json!({
        "id": PENDING_ORDER_ID,
        "order_number": PENDING_ORDER_NUMBER,
        "status": OrderStatus::Pending,
        "payment_status": PaymentStatus::Pending,
        "payment_method": "online",
        "total_amount": PENDING_ORDER_AMOUNT,
        "currency": "UAH",
    })
}

async fn my_orders(headers: HeaderMap) -> Response {
    if bearer_token(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }
    Json(json!([delivered_order(), unpaid_order()])).into_response()
}

async fn get_order(headers: HeaderMap, Path(id): Path<String>) -> Response {
    if bearer_token(&headers).is_none() {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }
    match id.as_str() {
        PENDING_ORDER_ID => Json(unpaid_order()).into_response(),
        "bk-900" => Json(delivered_order()).into_response(),
        _ => (StatusCode::NOT_FOUND, "order not found").into_response(),
    }
}

async fn create_payment(
    State(backend): State<Arc<StubBackend>>,
    Json(request): Json<Value>,
) -> Response {
    backend.payment_requests.lock().await.push(request.clone());

    if backend.fail_payments.load(Ordering::SeqCst) {
        return (StatusCode::BAD_GATEWAY, "payment provider unavailable").into_response();
    }

    let external_id = request
        .get("external_id")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Json(json!({
        "success": true,
        "action": { "value": format!("https://pay.test/session/{external_id}") },
    }))
    .into_response()
}

// ===== Delivery =====

async fn cities(
    State(backend): State<Arc<StubBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    backend.city_lookups.fetch_add(1, Ordering::SeqCst);
    let needle = params
        .get("query")
        .map(|q| q.to_lowercase())
        .unwrap_or_default();
    let matches: Vec<Value> = [("kyiv-ref", "Київ"), ("lviv-ref", "Львів")]
        .into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .map(|(city_ref, name)| {
            json!({ "city_ref": city_ref, "name": name, "delivery_city": city_ref })
        })
        .collect();
    Json(Value::Array(matches))
}

async fn warehouses(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let branches = [
        json!({
            "warehouse_ref": NP_BRANCH_REF,
            "number": NP_BRANCH_NUMBER,
            "description": NP_BRANCH_ADDRESS,
            "short_address": "вул. Лугова 12",
        }),
        json!({
            "warehouse_ref": "wh-7",
            "number": "7",
            "description": "Відділення №7: просп. Науки 4",
            "short_address": "просп. Науки 4",
        }),
    ];
    let filtered: Vec<Value> = branches
        .into_iter()
        .filter(|branch| {
            params.get("number").is_none_or(|number| {
                branch.get("number").and_then(Value::as_str) == Some(number.as_str())
            })
        })
        .collect();
    Json(Value::Array(filtered))
}

// ===== Seller =====

async fn seller_stats(headers: HeaderMap) -> Response {
    if bearer_token(&headers) != Some(SELLER_TOKEN) {
        return (StatusCode::FORBIDDEN, "seller account required").into_response();
    }
    Json(json!({
        "total_products": 2,
        "total_orders": 17,
        "pending_orders": 3,
        "revenue": "41250.00",
    }))
    .into_response()
}

async fn seller_products(headers: HeaderMap) -> Response {
    if bearer_token(&headers) != Some(SELLER_TOKEN) {
        return (StatusCode::FORBIDDEN, "seller account required").into_response();
    }
    Json(Value::Array(catalog())).into_response()
}
