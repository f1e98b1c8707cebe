//! End-to-end tests for login, registration, the dashboard guard and profile.

use reqwest::StatusCode;
use wanderlust_integration_tests::TestContext;

async fn login(ctx: &TestContext, email: &str) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/login"))
        .form(&[("email", email), ("password", "secret")])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.url().path(), "/dashboard");
    resp.text().await.expect("body")
}

#[tokio::test]
async fn test_dashboard_requires_login() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.url().path(), "/login");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Login Required"));
    assert!(body.contains("Please log in to access your dashboard."));
}

#[tokio::test]
async fn test_login_seeds_demo_history() {
    let ctx = TestContext::new().await;
    let body = login(&ctx, "sarah.j@example.com").await;
    assert!(body.contains("Login Successful"));
    assert!(body.contains("Upcoming Trips"));
    for reference in ["ABC123", "DEF456", "GHI789", "JKL012"] {
        assert!(body.contains(reference), "missing {reference}");
    }

    // Logging in again does not duplicate the demo bookings.
    let body = login(&ctx, "sarah.j@example.com").await;
    assert_eq!(body.matches("/dashboard/bookings/ABC123/ticket").count(), 1);
}

#[tokio::test]
async fn test_login_rejects_blank_password() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/login"))
        .form(&[("email", "raj@example.com"), ("password", "")])
        .send()
        .await
        .expect("Failed to post login");
    assert_eq!(resp.url().path(), "/login");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Login Failed"));
    assert!(body.contains("Please enter both email and password"));
}

#[tokio::test]
async fn test_register_validation_and_success() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/register"))
        .form(&[
            ("first_name", "Raj"),
            ("last_name", "Patel"),
            ("email", "raj@example.com"),
            ("password", "hunter22"),
            ("confirm_password", "hunter23"),
        ])
        .send()
        .await
        .expect("Failed to post register");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Passwords do not match"));
    assert!(body.contains("Please accept the terms"));
    assert!(body.contains(r#"value="Raj""#));

    let resp = ctx
        .client
        .post(ctx.url("/register"))
        .form(&[
            ("first_name", "Raj"),
            ("last_name", "Patel"),
            ("email", "raj@example.com"),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
            ("accept_terms", "on"),
        ])
        .send()
        .await
        .expect("Failed to post register");
    assert_eq!(resp.url().path(), "/dashboard");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Registration Successful"));
    assert!(body.contains("Welcome back, Raj Patel"));
    assert!(body.contains(">RP<"));
}

#[tokio::test]
async fn test_profile_update_and_logout() {
    let ctx = TestContext::new().await;
    login(&ctx, "maria@example.com").await;

    let resp = ctx
        .client
        .post(ctx.url("/profile"))
        .form(&[
            ("name", ""),
            ("email", "maria@example.com"),
            ("phone", ""),
            ("address", ""),
        ])
        .send()
        .await
        .expect("Failed to post profile");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.expect("body").contains("Full name is required"));

    let resp = ctx
        .client
        .post(ctx.url("/profile"))
        .form(&[
            ("name", "Maria Gonzalez"),
            ("email", "maria.g@example.com"),
            ("phone", "+34 600 123 456"),
            ("address", "Barcelona"),
        ])
        .send()
        .await
        .expect("Failed to post profile");
    assert_eq!(resp.url().path(), "/profile");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Profile Updated"));
    assert!(body.contains("maria.g@example.com"));

    let resp = ctx
        .client
        .post(ctx.url("/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.url().path(), "/");
    assert!(resp.text().await.expect("body").contains("Logged Out Successfully"));

    let resp = ctx
        .client
        .get(ctx.url("/profile"))
        .send()
        .await
        .expect("Failed to get profile");
    assert_eq!(resp.url().path(), "/login");
    assert!(resp.text().await.expect("body").contains("Authentication Required"));
}
