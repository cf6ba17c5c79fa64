//! Order placement end to end: the create-order / payment-session saga.
//!
//! Every test boots an in-process storefront wired to a stub backend, so
//! the suite runs with plain `cargo test` and no external services.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::atomic::Ordering;
use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;

use bazaar_integration_tests::{
    BUYER_EMAIL, BUYER_ID, BUYER_PASSWORD, BUYER_TOKEN, COFFEE_MAKER_ID, HEADPHONES_ID,
    NP_BRANCH_ADDRESS, NP_BRANCH_NUMBER, NP_BRANCH_REF, PENDING_ORDER_ID, PENDING_ORDER_NUMBER,
    TestApp, add_to_cart, client, fill_recipient, get_json, location, parse_decimal, place_order,
    post_json, select_nova_poshta, sign_in,
};

// ============================================================================
// Happy Paths
// ============================================================================

#[tokio::test]
async fn test_cash_order_happy_path() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 2).await;
    fill_recipient(&client, &app).await;

    let resp = place_order(&client, &app).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/checkout/success");

    let success = get_json(&client, &app.url("/checkout/success")).await;
    let order_number = success["order_number"].as_str().unwrap().to_string();
    assert!(order_number.starts_with("ORDER-"));
    assert_eq!(success["payment_method"], "on-delivery");
    assert_eq!(success["notices"][0]["level"], "success");
    assert_eq!(
        success["notices"][0]["message"],
        "Замовлення успішно оформлено!"
    );

    let orders = app.backend.orders.lock().await;
    assert_eq!(orders.len(), 1);
    let submission = &orders[0];
    assert!(submission.token.is_none());
    let order = &submission.payload;
    assert_eq!(order["order_number"].as_str().unwrap(), order_number);
    assert_eq!(order["buyer_id"], "guest");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_status"], "cash_on_delivery");
    assert_eq!(order["payment_method"], "on-delivery");
    assert_eq!(order["currency"], "UAH");
    assert_eq!(order["items"][0]["product_id"], HEADPHONES_ID);
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["items"][0]["seller_id"], "s-1");
    assert_eq!(
        parse_decimal(&order["items"][0]["price"]),
        Decimal::new(129_900, 2)
    );
    assert_eq!(
        parse_decimal(&order["total_amount"]),
        Decimal::new(259_800, 2)
    );
    drop(orders);

    // Cash orders clear the cart at completion.
    let cart = get_json(&client, &app.url("/cart")).await;
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_online_order_redirects_to_payment_page() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;
    let view = post_json(
        &client,
        &app.url("/checkout/payment"),
        &json!({ "method": "online" }),
    )
    .await;
    assert_eq!(view["payment_method"], "online");

    let resp = place_order(&client, &app).await;
    assert_eq!(resp.status().as_u16(), 303);
    let target = location(&resp);
    assert!(
        target.starts_with("https://pay.test/session/ORDER-"),
        "unexpected payment URL: {target}"
    );

    let orders = app.backend.orders.lock().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].payload["payment_status"], "pending");
    let order_number = orders[0].payload["order_number"]
        .as_str()
        .unwrap()
        .to_string();
    drop(orders);

    let payments = app.backend.payment_requests.lock().await;
    assert_eq!(payments.len(), 1);
    let payment = &payments[0];
    assert_eq!(payment["external_id"].as_str().unwrap(), order_number);
    assert_eq!(parse_decimal(&payment["amount"]), Decimal::new(129_900, 2));
    assert_eq!(payment["currency"], "UAH");
    assert_eq!(payment["customer"]["email"], "oksana@example.com");
    assert_eq!(payment["customer"]["first_name"], "Оксана");
    assert_eq!(payment["customer"]["last_name"], "Петренко");
    assert_eq!(payment["customer"]["phone"], "+38 050 123 45 67");
    assert_eq!(
        payment["description"].as_str().unwrap(),
        format!("Оплата замовлення {order_number}")
    );
    drop(payments);

    // The cart survives until the buyer comes back from the hosted page.
    let cart = get_json(&client, &app.url("/cart")).await;
    assert_eq!(cart["item_count"], 1);

    let success = get_json(&client, &app.url("/checkout/success")).await;
    assert_eq!(success["order_number"].as_str().unwrap(), order_number);
    assert_eq!(success["payment_method"], "online");

    let cart = get_json(&client, &app.url("/cart")).await;
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_logged_in_order_carries_buyer_identity() {
    let app = TestApp::spawn().await;
    let client = client();

    let resp = sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;
    assert_eq!(location(&resp), "/profile");

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;
    let resp = place_order(&client, &app).await;
    assert_eq!(location(&resp), "/checkout/success");

    let orders = app.backend.orders.lock().await;
    assert_eq!(orders[0].token.as_deref(), Some(BUYER_TOKEN));
    assert_eq!(orders[0].payload["buyer_id"], BUYER_ID);
}

#[tokio::test]
async fn test_nova_poshta_branch_becomes_shipping_address() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, COFFEE_MAKER_ID, 1).await;
    fill_recipient(&client, &app).await;
    let view = select_nova_poshta(&client, &app).await;
    assert_eq!(view["delivery_method"], "nova-poshta");
    assert_eq!(view["nova_poshta"]["warehouse"]["number"], NP_BRANCH_NUMBER);
    assert_eq!(parse_decimal(&view["delivery_price"]), Decimal::from(72));
    assert_eq!(parse_decimal(&view["total"]), Decimal::new(257_150, 2));

    let resp = place_order(&client, &app).await;
    assert_eq!(location(&resp), "/checkout/success");

    let orders = app.backend.orders.lock().await;
    let address = &orders[0].payload["shipping_address"];
    assert_eq!(address["street"], NP_BRANCH_ADDRESS);
    assert_eq!(address["city"], "Київ");
    assert_eq!(address["postal_code"], "");
    assert_eq!(address["country"], "UA");
    assert_eq!(address["warehouse_ref"], NP_BRANCH_REF);
    assert_eq!(address["warehouse_number"], NP_BRANCH_NUMBER);
    assert_eq!(
        parse_decimal(&orders[0].payload["total_amount"]),
        Decimal::new(257_150, 2)
    );
}

// ============================================================================
// Failure & Resume Paths
// ============================================================================

#[tokio::test]
async fn test_payment_failure_keeps_order_for_retry() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;
    post_json(
        &client,
        &app.url("/checkout/payment"),
        &json!({ "method": "online" }),
    )
    .await;

    app.backend.fail_payments.store(true, Ordering::SeqCst);
    let resp = place_order(&client, &app).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/checkout");

    let view = get_json(&client, &app.url("/checkout")).await;
    assert_eq!(view["phase"], "editing");
    assert_eq!(view["notices"][0]["level"], "error");
    let message = view["notices"][0]["message"].as_str().unwrap();
    assert!(
        message.starts_with("Помилка оплати:"),
        "unexpected notice: {message}"
    );
    assert!(message.contains("payment provider unavailable"));

    // The order itself went through; only the payment session failed.
    assert_eq!(app.backend.orders.lock().await.len(), 1);
    assert_eq!(app.backend.payment_requests.lock().await.len(), 1);

    app.backend.fail_payments.store(false, Ordering::SeqCst);
    let resp = place_order(&client, &app).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert!(location(&resp).starts_with("https://pay.test/session/"));

    // No duplicate backend order; the retry resumes at the payment step.
    assert_eq!(app.backend.orders.lock().await.len(), 1);
    let payments = app.backend.payment_requests.lock().await;
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["external_id"], payments[1]["external_id"]);
}

#[tokio::test]
async fn test_order_failure_retry_submits_fresh_order() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;

    app.backend.fail_orders.store(true, Ordering::SeqCst);
    let resp = place_order(&client, &app).await;
    assert_eq!(location(&resp), "/checkout");

    let view = get_json(&client, &app.url("/checkout")).await;
    let message = view["notices"][0]["message"].as_str().unwrap();
    assert!(message.starts_with("Помилка при оформленні замовлення:"));
    assert!(message.contains("order service unavailable"));

    app.backend.fail_orders.store(false, Ordering::SeqCst);
    // Order numbers are millisecond-stamped; give the retry its own stamp.
    tokio::time::sleep(Duration::from_millis(2)).await;
    let resp = place_order(&client, &app).await;
    assert_eq!(location(&resp), "/checkout/success");

    let orders = app.backend.orders.lock().await;
    assert_eq!(orders.len(), 2);
    assert_ne!(
        orders[0].payload["order_number"],
        orders[1].payload["order_number"]
    );
}

#[tokio::test]
async fn test_cancelled_payment_resumes_existing_order() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;
    post_json(
        &client,
        &app.url("/checkout/payment"),
        &json!({ "method": "online" }),
    )
    .await;

    let resp = place_order(&client, &app).await;
    assert!(location(&resp).starts_with("https://pay.test/session/"));

    // The buyer backs out of the hosted payment page.
    let resp = client
        .get(app.url("/checkout/cancel"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/cart");

    let view = get_json(&client, &app.url("/checkout")).await;
    assert_eq!(view["phase"], "editing");

    let resp = place_order(&client, &app).await;
    assert!(location(&resp).starts_with("https://pay.test/session/"));

    assert_eq!(app.backend.orders.lock().await.len(), 1);
    let payments = app.backend.payment_requests.lock().await;
    assert_eq!(payments.len(), 2);
    assert_eq!(payments[0]["external_id"], payments[1]["external_id"]);
}

#[tokio::test]
async fn test_duplicate_submission_creates_one_order() {
    let app = TestApp::spawn().await;
    let client = client();

    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;
    fill_recipient(&client, &app).await;

    // Hold the backend long enough for a second click to land mid-saga.
    app.backend.order_delay_ms.store(400, Ordering::SeqCst);

    let first = place_order(&client, &app);
    let second = async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        place_order(&client, &app).await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.status().as_u16(), 303);
    assert_eq!(location(&first), "/checkout/success");

    // The second click bounces without reaching the backend.
    assert_eq!(second.status().as_u16(), 303);
    assert_eq!(location(&second), "/checkout");
    assert_eq!(app.backend.orders.lock().await.len(), 1);
}

#[tokio::test]
async fn test_payment_resume_reopens_hosted_session() {
    let app = TestApp::spawn().await;
    let client = client();

    // The pay link is only offered to signed-in buyers.
    let resp = client
        .get(app.url(&format!("/payment/resume/{PENDING_ORDER_ID}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");

    sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;
    let resp = client
        .get(app.url(&format!("/payment/resume/{PENDING_ORDER_ID}")))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(
        location(&resp),
        format!("https://pay.test/session/{PENDING_ORDER_NUMBER}")
    );

    let payments = app.backend.payment_requests.lock().await;
    assert_eq!(payments.len(), 1);
    let request = &payments[0];
    assert_eq!(request["external_id"], PENDING_ORDER_NUMBER);
    assert_eq!(parse_decimal(&request["amount"]), Decimal::new(49_900, 2));
    assert_eq!(
        request["description"],
        format!("Оплата замовлення {PENDING_ORDER_NUMBER}")
    );

    // Contact details come from the saved profile, not a checkout form.
    assert_eq!(request["customer"]["email"], BUYER_EMAIL);
    assert_eq!(request["customer"]["first_name"], "Оксана");
    assert_eq!(request["customer"]["last_name"], "Петренко");
    assert_eq!(request["customer"]["phone"], "380501234567");
}

#[tokio::test]
async fn test_payment_resume_rejects_settled_order() {
    let app = TestApp::spawn().await;
    let client = client();
    sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;

    // Paid and delivered; there is nothing to resume.
    let resp = client
        .get(app.url("/payment/resume/bk-900"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);

    // Unknown order.
    let resp = client
        .get(app.url("/payment/resume/bk-404"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    assert_eq!(app.backend.payment_requests.lock().await.len(), 0);
}
