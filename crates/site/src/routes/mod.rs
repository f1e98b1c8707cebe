//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /destinations/{code}    - Featured destination quick search
//! GET  /health                 - Health check
//!
//! # Search
//! GET  /search                 - Search form
//! POST /search                 - Validate and store criteria
//! GET  /search/results         - Results with filters and sort
//! POST /search/select/{id}     - Start booking a flight
//!
//! # Booking
//! GET  /booking                - Current wizard step
//! POST /booking/seat           - Choose seat
//! POST /booking/passenger      - Passenger details
//! POST /booking/payment        - Pay (simulated)
//! POST /booking/back           - Previous step
//!
//! # Account (requires login)
//! GET  /dashboard              - Upcoming and past trips
//! GET  /dashboard/bookings/{ref}/ticket - E-ticket download
//! GET  /profile                - Profile
//! POST /profile                - Save profile
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action (rate limited)
//! GET  /register               - Register page
//! POST /register               - Register action (rate limited)
//! POST /logout                 - Logout action
//! ```

pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod forms;
pub mod home;
pub mod profile;
pub mod search;

use axum::{
    Router,
    routing::{MethodRouter, get, post},
};

use crate::middleware::auth_rate_limiter;
use crate::state::AppState;

/// Create the search routes router.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search::search_page).post(search::search))
        .route("/results", get(search::results))
        .route("/select/{id}", post(search::select))
}

/// Create the booking wizard routes router.
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::show))
        .route("/seat", post(booking::choose_seat))
        .route("/passenger", post(booking::submit_passenger))
        .route("/payment", post(booking::pay))
        .route("/back", post(booking::back))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/bookings/{reference}/ticket", get(dashboard::ticket))
}

/// A form page whose POST is rate limited when `limited` is set.
fn form_route<P, H, TP, TH>(page: P, handler: H, limited: bool) -> MethodRouter<AppState>
where
    P: axum::handler::Handler<TP, AppState>,
    H: axum::handler::Handler<TH, AppState>,
    TP: 'static,
    TH: 'static,
{
    let action = post(handler);
    let action = match limited.then(auth_rate_limiter).flatten() {
        Some(limiter) => action.layer(limiter),
        None => action,
    };
    get(page).merge(action)
}

/// Create the auth routes router.
pub fn auth_routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            form_route(auth::login_page, auth::login, rate_limit),
        )
        .route(
            "/register",
            form_route(auth::register_page, auth::register, rate_limit),
        )
        .route("/logout", post(auth::logout))
}

/// Create all routes for the site.
pub fn routes(rate_limit: bool) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/destinations/{code}", get(home::destination))
        .nest("/search", search_routes())
        .nest("/booking", booking_routes())
        .nest("/dashboard", dashboard_routes())
        .route("/profile", get(profile::show).post(profile::update))
        .merge(auth_routes(rate_limit))
}
