//! End-to-end tests for search, the booking wizard and the dashboard.

use chrono::{Days, Utc};
use reqwest::StatusCode;
use wanderlust_integration_tests::{TestContext, free_seats};

fn depart_date() -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(10))
        .expect("date in range")
        .format("%Y-%m-%d")
        .to_string()
}

/// Search Delhi to Mumbai and start booking its first flight.
async fn start_booking(ctx: &TestContext) -> String {
    let resp = ctx
        .client
        .post(ctx.url("/search"))
        .form(&[
            ("trip_type", "one-way"),
            ("origin", "DEL"),
            ("destination", "BOM"),
            ("depart_date", depart_date().as_str()),
            ("passengers", "1"),
            ("travel_class", "Economy"),
        ])
        .send()
        .await
        .expect("Failed to post search");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().ends_with("/search/results"));
    let body = resp.text().await.expect("Failed to read results");
    assert!(body.contains("DEL to BOM"));
    assert!(body.contains("/search/select/flight-DEL-BOM-0"));

    let resp = ctx
        .client
        .post(ctx.url("/search/select/flight-DEL-BOM-0"))
        .send()
        .await
        .expect("Failed to select flight");
    assert_eq!(resp.url().path(), "/booking");
    resp.text().await.expect("Failed to read seat step")
}

fn passenger_form(first_name: &str) -> Vec<(&str, &str)> {
    vec![
        ("title", "Ms"),
        ("first_name", first_name),
        ("last_name", "Gonzalez"),
        ("date_of_birth", "1990-04-12"),
        ("email", "maria@example.com"),
        ("phone", "+34 600 123 456"),
        ("nationality", "Spanish"),
        ("passport_number", ""),
        ("meal_preference", "vegetarian"),
        ("add_baggage", "on"),
    ]
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_health_and_headers() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to get home");
    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers().clone();
    assert_eq!(headers.get("x-frame-options").expect("frame header"), "DENY");
    assert!(headers.get("x-request-id").is_some());
    assert!(headers.get("content-security-policy").is_some());
    let body = resp.text().await.expect("body");
    assert!(body.contains("Find and Book Your Perfect Flight"));
    assert!(body.contains("Popular Destinations"));
}

#[tokio::test]
async fn test_static_css_served() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/static/css/main.css"))
        .send()
        .await
        .expect("Failed to get stylesheet");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_without_origin_shows_toast() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .post(ctx.url("/search"))
        .form(&[("destination", "BOM"), ("return_to", "/search")])
        .send()
        .await
        .expect("Failed to post search");
    assert_eq!(resp.url().path(), "/search");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Missing origin"));
    assert!(body.contains("Please select a departure city"));
}

#[tokio::test]
async fn test_quick_search_to_unserved_destination_is_empty() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/destinations/HND"))
        .send()
        .await
        .expect("Failed to follow destination card");
    assert_eq!(resp.url().path(), "/search/results");
    let body = resp.text().await.expect("body");
    assert!(body.contains("BOM to HND"));
    assert!(body.contains("No flights found"));
}

#[tokio::test]
async fn test_results_filters_by_stops() {
    let ctx = TestContext::new().await;
    start_booking(&ctx).await;

    let resp = ctx
        .client
        .get(ctx.url("/search/results?stops=0&sort=duration"))
        .send()
        .await
        .expect("Failed to filter results");
    let body = resp.text().await.expect("body");
    assert!(!body.contains("1 Stop</span>"));
    assert!(body.contains(r#"value="0" checked"#));
    assert!(body.contains(r#"value="duration" selected"#));
}

// ============================================================================
// Booking Wizard
// ============================================================================

#[tokio::test]
async fn test_full_booking_flow() {
    let ctx = TestContext::new().await;
    let seat_page = start_booking(&ctx).await;
    assert!(seat_page.contains("Select Your Seat"));

    let seat = free_seats(&seat_page)
        .into_iter()
        .next()
        .expect("At least one free seat");
    let resp = ctx
        .client
        .post(ctx.url("/booking/seat"))
        .form(&[("seat", seat.as_str())])
        .send()
        .await
        .expect("Failed to choose seat");
    let body = resp.text().await.expect("body");
    assert!(body.contains(&format!("You have selected seat: {seat}")));
    assert!(body.contains("Passenger Details"));

    // Invalid passenger details are re-rendered with inline errors.
    let resp = ctx
        .client
        .post(ctx.url("/booking/passenger"))
        .form(&passenger_form(""))
        .send()
        .await
        .expect("Failed to post passenger");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.text().await.expect("body").contains("First name is required"));

    let resp = ctx
        .client
        .post(ctx.url("/booking/passenger"))
        .form(&passenger_form("Maria"))
        .send()
        .await
        .expect("Failed to post passenger");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Passenger information for Maria Gonzalez has been saved."));
    assert!(body.contains("Extra baggage"));

    let resp = ctx
        .client
        .post(ctx.url("/booking/payment"))
        .form(&[
            ("method", "credit_card"),
            ("cardholder_name", "Maria Gonzalez"),
            ("card_number", "4242 4242 4242 4242"),
            ("expiry", "12/30"),
            ("cvv", "123"),
        ])
        .send()
        .await
        .expect("Failed to pay");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Payment successful!"));
    assert!(body.contains("Booking Confirmed!"));
    assert!(body.contains("ending in 4242"));
    assert!(!body.contains("4242 4242 4242 4242"));

    let reference = body
        .split("Booking reference: ")
        .nth(1)
        .and_then(|rest| rest.get(..6))
        .expect("Reference in toast")
        .to_owned();

    let resp = ctx
        .client
        .get(ctx.url(&format!("/dashboard/bookings/{reference}/ticket")))
        .send()
        .await
        .expect("Failed to download ticket");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains(&format!("wanderlust-{reference}.txt")))
    );
    let ticket = resp.text().await.expect("body");
    assert!(ticket.contains(&format!("Booking reference: {reference}")));
    assert!(ticket.contains("Passenger:         Maria Gonzalez"));

    // The booking shows up on the dashboard next to the demo history.
    let resp = ctx
        .client
        .post(ctx.url("/login"))
        .form(&[("email", "maria@example.com"), ("password", "secret")])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.url().path(), "/dashboard");
    let body = resp.text().await.expect("body");
    assert!(body.contains(&reference));
    assert!(body.contains("ABC123"));
}

#[tokio::test]
async fn test_out_of_order_payment_stays_on_seat_step() {
    let ctx = TestContext::new().await;
    start_booking(&ctx).await;

    let resp = ctx
        .client
        .post(ctx.url("/booking/payment"))
        .form(&[("method", "paypal")])
        .send()
        .await
        .expect("Failed to post payment");
    assert_eq!(resp.url().path(), "/booking");
    assert!(resp.text().await.expect("body").contains("Select Your Seat"));
}

#[tokio::test]
async fn test_booking_without_flight_redirects_to_search() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/booking"))
        .send()
        .await
        .expect("Failed to get booking");
    assert_eq!(resp.url().path(), "/search");
    assert!(resp.text().await.expect("body").contains("No flight selected"));
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let ctx = TestContext::new().await;
    let resp = ctx
        .client
        .get(ctx.url("/dashboard/bookings/ZZZ999/ticket"))
        .send()
        .await
        .expect("Failed to get ticket");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
