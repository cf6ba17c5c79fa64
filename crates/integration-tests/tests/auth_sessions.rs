//! Login, registration, logout, and role-gated pages.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bazaar_integration_tests::{
    BUYER_EMAIL, BUYER_PASSWORD, HEADPHONES_ID, SELLER_EMAIL, SELLER_PASSWORD, TAKEN_EMAIL,
    TestApp, add_to_cart, client, get_json, location, sign_in,
};

#[tokio::test]
async fn test_buyer_login_lands_on_profile() {
    let app = TestApp::spawn().await;
    let client = client();

    let resp = sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/profile");

    let profile = get_json(&client, &app.url("/profile")).await;
    assert_eq!(profile["profile"]["email"], BUYER_EMAIL);
    assert_eq!(profile["orders"][0]["order_number"], "ORDER-1755000000000");
}

#[tokio::test]
async fn test_seller_login_lands_on_dashboard() {
    let app = TestApp::spawn().await;
    let client = client();

    let resp = sign_in(&client, &app, SELLER_EMAIL, SELLER_PASSWORD).await;
    assert_eq!(location(&resp), "/seller/dashboard");

    let dashboard = get_json(&client, &app.url("/seller/dashboard")).await;
    assert_eq!(dashboard["stats"]["total_orders"], 17);
    assert_eq!(dashboard["stats"]["pending_orders"], 3);
    assert_eq!(dashboard["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_wrong_password_shows_notice() {
    let app = TestApp::spawn().await;
    let client = client();

    let resp = sign_in(&client, &app, BUYER_EMAIL, "wrong").await;
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");

    let page = get_json(&client, &app.url("/login")).await;
    assert_eq!(page["notices"][0]["level"], "error");
    assert_eq!(page["notices"][0]["message"], "Невірний email або пароль");

    // Still anonymous.
    let resp = client.get(app.url("/profile")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/login");
}

#[tokio::test]
async fn test_registration_role_seeding_and_conflict() {
    let app = TestApp::spawn().await;
    let client = client();

    let page = get_json(&client, &app.url("/register?role=seller")).await;
    assert_eq!(page["role"], "seller");

    let resp = client
        .post(app.url("/register"))
        .form(&[
            ("email", TAKEN_EMAIL),
            ("password", "secret123"),
            ("full_name", "Тест Тестенко"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/register");
    let page = get_json(&client, &app.url("/register")).await;
    assert_eq!(
        page["notices"][0]["message"],
        "Акаунт з таким email вже існує"
    );

    let resp = client
        .post(app.url("/register"))
        .form(&[
            ("email", "newseller@example.com"),
            ("password", "secret123"),
            ("full_name", "Тарас Коваль"),
            ("role", "seller"),
            ("company_name", "Коваль Трейд"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/seller/dashboard");
}

#[tokio::test]
async fn test_logout_clears_identity_keeps_cart() {
    let app = TestApp::spawn().await;
    let client = client();

    sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;
    add_to_cart(&client, &app, HEADPHONES_ID, 1).await;

    let resp = client.post(app.url("/logout")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 303);
    assert_eq!(location(&resp), "/");

    let resp = client.get(app.url("/profile")).send().await.unwrap();
    assert_eq!(location(&resp), "/login");

    let cart = get_json(&client, &app.url("/cart")).await;
    assert_eq!(cart["item_count"], 1);
    assert_eq!(cart["notices"][0]["message"], "Ви вийшли з акаунта");
}

#[tokio::test]
async fn test_role_gated_pages_redirect() {
    let app = TestApp::spawn().await;
    let client = client();

    // Anonymous visitors are sent to the login page.
    let resp = client.get(app.url("/profile")).send().await.unwrap();
    assert_eq!(location(&resp), "/login");

    // A buyer has no business on the seller or admin pages.
    sign_in(&client, &app, BUYER_EMAIL, BUYER_PASSWORD).await;
    let resp = client
        .get(app.url("/seller/dashboard"))
        .send()
        .await
        .unwrap();
    assert_eq!(location(&resp), "/");
    let resp = client.get(app.url("/admin")).send().await.unwrap();
    assert_eq!(location(&resp), "/");
}
