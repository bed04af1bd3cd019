//! Cart and WhatsApp checkout flows.

use axum::http::StatusCode;
use febsin_integration_tests::TestApp;

async fn add_tee(app: &mut TestApp) {
    let resp = app
        .post_form(
            "/cart/add",
            &[("product_id", "1"), ("size", "M"), ("quantity", "2")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart?success=cart_added"));
}

#[tokio::test]
async fn test_add_to_cart_shows_line_and_badge() {
    let mut app = TestApp::new();
    add_tee(&mut app).await;

    let resp = app.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Febsin Classic Black Tee"));
    assert!(resp.body.contains("Rp 398.000"));

    let resp = app.get("/cart/count").await;
    assert!(resp.body.contains('2'));
}

#[tokio::test]
async fn test_add_without_size_goes_back_to_product() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/cart/add", &[("product_id", "1"), ("size", "")])
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/product/1?error=size_required"));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let mut app = TestApp::new();
    add_tee(&mut app).await;

    let resp = app
        .post_form(
            "/cart/update",
            &[("product_id", "1"), ("size", "M"), ("quantity", "0")],
        )
        .await;
    assert_eq!(resp.location(), Some("/cart?success=cart_removed"));

    let resp = app.get("/cart").await;
    assert!(!resp.body.contains("Febsin Classic Black Tee"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_goes_to_cart() {
    let mut app = TestApp::new();
    let resp = app.get("/checkout").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart?error=cart_empty"));
}

#[tokio::test]
async fn test_checkout_missing_fields_rerenders() {
    let mut app = TestApp::new();
    add_tee(&mut app).await;

    let resp = app
        .post_form("/checkout", &[("name", "Feby"), ("phone", "")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("value=\"Feby\""));
}

#[tokio::test]
async fn test_checkout_hands_off_to_whatsapp_and_clears_cart() {
    let mut app = TestApp::new();
    add_tee(&mut app).await;

    let resp = app
        .post_form(
            "/checkout",
            &[
                ("name", "Feby"),
                ("email", "feby@febsin.id"),
                ("phone", "08123456789"),
                ("address", "Jl. Sukowati 1"),
                ("city", "Sragen"),
                ("province", "Jawa Tengah"),
                ("postal_code", "57211"),
                ("shipping_method", "sicepat"),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location().unwrap_or_default();
    assert!(location.starts_with("https://wa.me/6285291619898?text="));
    assert!(location.contains("Febsin%20Classic%20Black%20Tee"));

    let resp = app.get("/checkout").await;
    assert_eq!(resp.location(), Some("/cart?error=cart_empty"));
}
