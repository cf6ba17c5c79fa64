//! Catalog pages, the session cart, favorites, lookups, and language.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::atomic::Ordering;

use rust_decimal::Decimal;
use serde_json::json;

use bazaar_integration_tests::{
    COFFEE_MAKER_ID, HEADPHONES_ID, TestApp, add_to_cart, client, get_json, parse_decimal,
    post_json,
};

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_home_page_sections() {
    let app = TestApp::spawn().await;
    let client = client();

    let home = get_json(&client, &app.url("/")).await;
    assert_eq!(home["language"], "ua");
    assert_eq!(home["featured_products"].as_array().unwrap().len(), 2);

    // Only flagged products make the bestseller rail.
    let bestsellers = home["bestsellers"].as_array().unwrap();
    assert_eq!(bestsellers.len(), 1);
    assert_eq!(bestsellers[0]["id"], HEADPHONES_ID);
    assert_eq!(
        bestsellers[0]["image"],
        "https://img.bazaar.ua/p-100/main.jpg"
    );
}

#[tokio::test]
async fn test_product_listing_search() {
    let app = TestApp::spawn().await;
    let client = client();

    let all = get_json(&client, &app.url("/products")).await;
    assert_eq!(all["products"].as_array().unwrap().len(), 2);

    let filtered = get_json(&client, &app.url("/products?search=навушники")).await;
    let products = filtered["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["id"], HEADPHONES_ID);
    assert_eq!(filtered["applied"]["search"], "навушники");
}

#[tokio::test]
async fn test_product_detail_and_unknown_id() {
    let app = TestApp::spawn().await;
    let client = client();

    let view = get_json(&client, &app.url("/product/p-100")).await;
    assert_eq!(view["product"]["title"], "Бездротові навушники Sonic 5");
    assert_eq!(view["is_favorite"], false);
    assert_eq!(view["in_comparison"], false);

    let resp = client.get(app.url("/product/p-999")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn test_suggestions_require_two_characters() {
    let app = TestApp::spawn().await;
    let client = client();

    let short = get_json(&client, &app.url("/search/suggestions?q=к")).await;
    assert!(short.as_array().unwrap().is_empty());
    assert_eq!(app.backend.suggestion_lookups.load(Ordering::SeqCst), 0);

    let hits = get_json(&client, &app.url("/search/suggestions?q=кавоварка")).await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["title"], "Кавоварка Dnipro Brew 700");
    assert_eq!(app.backend.suggestion_lookups.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_lifecycle() {
    let app = TestApp::spawn().await;
    let client = client();

    let cart = add_to_cart(&client, &app, HEADPHONES_ID, 2).await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(parse_decimal(&cart["subtotal"]), Decimal::new(259_800, 2));
    assert_eq!(
        parse_decimal(&cart["items"][0]["line_total"]),
        Decimal::new(259_800, 2)
    );
    assert_eq!(cart["items"][0]["title"], "Бездротові навушники Sonic 5");

    let cart = add_to_cart(&client, &app, COFFEE_MAKER_ID, 1).await;
    assert_eq!(cart["item_count"], 3);
    assert_eq!(parse_decimal(&cart["subtotal"]), Decimal::new(509_750, 2));

    let cart = post_json(
        &client,
        &app.url(&format!("/cart/items/{HEADPHONES_ID}")),
        &json!({ "quantity": 1 }),
    )
    .await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(parse_decimal(&cart["subtotal"]), Decimal::new(379_850, 2));

    // Quantity zero drops the line.
    let cart = post_json(
        &client,
        &app.url(&format!("/cart/items/{COFFEE_MAKER_ID}")),
        &json!({ "quantity": 0 }),
    )
    .await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);

    let cart = post_json(
        &client,
        &app.url(&format!("/cart/items/{HEADPHONES_ID}/remove")),
        &json!({}),
    )
    .await;
    assert_eq!(cart["item_count"], 0);

    // Unknown products cannot be added.
    let resp = client
        .post(app.url("/cart/items"))
        .json(&json!({ "product_id": "p-999", "quantity": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);
}

#[tokio::test]
async fn test_favorites_and_comparison() {
    let app = TestApp::spawn().await;
    let client = client();

    let toggle = post_json(
        &client,
        &app.url(&format!("/favorites/{HEADPHONES_ID}/toggle")),
        &json!({}),
    )
    .await;
    assert_eq!(toggle["active"], true);
    assert_eq!(toggle["count"], 1);

    let favorites = get_json(&client, &app.url("/favorites")).await;
    assert_eq!(favorites["products"][0]["id"], HEADPHONES_ID);

    let toggle = post_json(
        &client,
        &app.url(&format!("/favorites/{HEADPHONES_ID}/toggle")),
        &json!({}),
    )
    .await;
    assert_eq!(toggle["active"], false);
    assert_eq!(toggle["count"], 0);

    post_json(
        &client,
        &app.url(&format!("/comparison/{HEADPHONES_ID}/toggle")),
        &json!({}),
    )
    .await;
    post_json(
        &client,
        &app.url(&format!("/comparison/{COFFEE_MAKER_ID}/toggle")),
        &json!({}),
    )
    .await;
    let comparison = get_json(&client, &app.url("/comparison")).await;
    assert_eq!(comparison["products"].as_array().unwrap().len(), 2);
}

// ============================================================================
// Delivery Lookups & Language
// ============================================================================

#[tokio::test]
async fn test_city_lookup_minimum_length() {
    let app = TestApp::spawn().await;
    let client = client();

    let short = get_json(&client, &app.url("/delivery/cities?query=К")).await;
    assert!(short.as_array().unwrap().is_empty());
    assert_eq!(app.backend.city_lookups.load(Ordering::SeqCst), 0);

    let cities = get_json(&client, &app.url("/delivery/cities?query=Киї")).await;
    assert_eq!(cities[0]["name"], "Київ");
    assert_eq!(cities[0]["city_ref"], "kyiv-ref");
    assert_eq!(app.backend.city_lookups.load(Ordering::SeqCst), 1);

    let branches = get_json(&client, &app.url("/delivery/warehouses?city_ref=kyiv-ref")).await;
    assert_eq!(branches.as_array().unwrap().len(), 2);

    let branch = get_json(
        &client,
        &app.url("/delivery/warehouses?city_ref=kyiv-ref&number=23"),
    )
    .await;
    assert_eq!(branch[0]["number"], "23");
}

#[tokio::test]
async fn test_language_switch_localizes_content() {
    let app = TestApp::spawn().await;
    let client = client();

    let language = get_json(&client, &app.url("/language")).await;
    assert_eq!(language["language"], "ua");
    let contact = get_json(&client, &app.url("/contact")).await;
    assert_eq!(contact["title"], "Контакти");

    let echo = post_json(&client, &app.url("/language"), &json!({ "language": "ru" })).await;
    assert_eq!(echo["language"], "ru");
    let contact = get_json(&client, &app.url("/contact")).await;
    assert_eq!(contact["title"], "Контакты");
}
