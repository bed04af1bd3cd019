//! Login, member pricing and member-only actions.

use axum::http::StatusCode;
use febsin_integration_tests::TestApp;

#[tokio::test]
async fn test_dashboard_requires_login() {
    let mut app = TestApp::new();
    let resp = app.get("/dashboard?tab=orders").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(
        resp.location(),
        Some("/auth/login?error=login_required&return_to=%2Fdashboard%3Ftab%3Dorders")
    );
}

#[tokio::test]
async fn test_invalid_login_returns_to_form() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/auth/login", &[("email", "not-an-email"), ("password", "x")])
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/auth/login?error=invalid_email"));
}

#[tokio::test]
async fn test_login_then_dashboard() {
    let mut app = TestApp::new();
    let resp = app.login().await;
    assert_eq!(resp.location(), Some("/dashboard?success=login"));

    let resp = app.get("/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Member Febsin"));

    let resp = app.post_form("/auth/logout", &[]).await;
    assert_eq!(resp.location(), Some("/?success=logout"));

    let resp = app.get("/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_member_cart_gets_member_price() {
    let mut app = TestApp::new();
    app.post_form("/cart/add", &[("product_id", "1"), ("size", "L")])
        .await;

    let resp = app.get("/cart").await;
    assert!(resp.body.contains("Rp 199.000"));
    assert!(!resp.body.contains("Hemat Member"));

    app.login().await;
    let resp = app.get("/cart").await;
    assert!(resp.body.contains("Rp 179.000"));
    assert!(resp.body.contains("Hemat Member"));
}

#[tokio::test]
async fn test_wishlist_toggle_requires_login() {
    let mut app = TestApp::new();
    let resp = app
        .post_form("/wishlist/toggle", &[("product_id", "2")])
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location().unwrap_or_default();
    assert!(location.starts_with("/auth/login?error=login_required"));
}

#[tokio::test]
async fn test_wishlist_add_then_remove_for_member() {
    let mut app = TestApp::new();
    app.login().await;

    let resp = app
        .post_form(
            "/wishlist/toggle",
            &[("product_id", "2"), ("action", "add"), ("return_to", "/shop")],
        )
        .await;
    assert_eq!(resp.location(), Some("/shop?success=wishlist_added"));

    let resp = app.get("/dashboard?tab=wishlist").await;
    assert!(resp.body.contains("Urban Hoodie Premium"));

    let resp = app.get("/product/2").await;
    assert!(resp.body.contains(r#"name="action" value="remove""#));

    let resp = app
        .post_form(
            "/wishlist/toggle",
            &[("product_id", "2"), ("action", "remove"), ("return_to", "/shop")],
        )
        .await;
    assert_eq!(resp.location(), Some("/shop?success=wishlist_removed"));

    let resp = app.get("/dashboard?tab=wishlist").await;
    assert!(!resp.body.contains("Urban Hoodie Premium"));
}

#[tokio::test]
async fn test_wishlist_double_submit_keeps_item_saved() {
    let mut app = TestApp::new();
    app.login().await;

    let form = [("product_id", "2"), ("action", "add"), ("return_to", "/shop")];
    let first = app.post_form("/wishlist/toggle", &form).await;
    let second = app.post_form("/wishlist/toggle", &form).await;
    assert_eq!(first.location(), Some("/shop?success=wishlist_added"));
    assert_eq!(second.location(), Some("/shop?success=wishlist_added"));

    let resp = app.get("/dashboard?tab=wishlist").await;
    assert!(resp.body.contains("Urban Hoodie Premium"));
    assert!(resp.body.contains(r#"♥<span class="badge">1</span>"#));
}

#[tokio::test]
async fn test_review_submission_shows_on_product() {
    let mut app = TestApp::new();
    app.login().await;

    let resp = app
        .post_form(
            "/product/3/reviews",
            &[
                ("rating", "5"),
                ("title", "Flanelnya adem"),
                ("comment", "Bahannya tebal tapi tetap adem dipakai seharian."),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(
        resp.location()
            .unwrap_or_default()
            .starts_with("/product/3?success=review_submitted")
    );

    let resp = app.get("/product/3").await;
    assert!(resp.body.contains("Flanelnya adem"));
}

#[tokio::test]
async fn test_member_sees_savings_on_product_page() {
    let mut app = TestApp::new();
    let resp = app.get("/product/1").await;
    assert!(!resp.body.contains("dengan harga member"));

    app.login().await;
    let resp = app.get("/product/1").await;
    assert!(resp.body.contains("Hemat Rp 20.000 dengan harga member"));
}

/// Ids of the reviews on a product page, in display order.
fn review_ids(body: &str) -> Vec<String> {
    body.split(r#"action="/reviews/"#)
        .skip(1)
        .filter_map(|rest| rest.split('/').next())
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_own_helpful_vote_does_not_reorder_reviews() {
    let mut app = TestApp::new();
    app.login().await;

    for title in ["Review pertama", "Review kedua"] {
        app.post_form(
            "/product/3/reviews",
            &[("rating", "4"), ("title", title), ("comment", "Nyaman dipakai.")],
        )
        .await;
    }

    let resp = app.get("/product/3?sort=helpful").await;
    let before = review_ids(&resp.body);
    assert_eq!(before.len(), 2);

    let second = before.last().cloned().unwrap_or_default();
    let resp = app
        .post_form(
            &format!("/reviews/{second}/helpful"),
            &[("return_to", "/product/3?sort=helpful")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let resp = app.get("/product/3?sort=helpful").await;
    assert_eq!(review_ids(&resp.body), before);
    assert!(resp.body.contains("Helpful (1)"));
}
