//! Integration tests for WanderlustWings.
//!
//! Each test serves the real router on an ephemeral port and drives it with
//! a cookie-keeping `reqwest` client, the way a browser would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wanderlust-integration-tests
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::Client;
use wanderlust_core::generator::FlightCatalog;
use wanderlust_site::config::SiteConfig;
use wanderlust_site::state::AppState;

/// Catalog seed shared by every test.
pub const CATALOG_SEED: u64 = 42;

/// A running site and a client with its own cookie jar.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Serve the site with demo bookings on, no payment delay and no rate
    /// limiting.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn new() -> Self {
        Self::with_config(SiteConfig {
            payment_delay: Duration::ZERO,
            rate_limit: false,
            catalog_seed: Some(CATALOG_SEED),
            ..SiteConfig::default()
        })
        .await
    }

    /// Serve the site with a custom configuration.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn with_config(config: SiteConfig) -> Self {
        let catalog = FlightCatalog::generate(&mut StdRng::seed_from_u64(
            config.catalog_seed.unwrap_or(CATALOG_SEED),
        ));
        let app = wanderlust_site::app(AppState::with_catalog(config, catalog));

        let listener = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for a path on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Values of every enabled `<input name="seat">` radio in a seat step page.
#[must_use]
pub fn free_seats(html: &str) -> Vec<String> {
    const MARKER: &str = r#"name="seat" value=""#;
    html.match_indices(MARKER)
        .filter_map(|(at, _)| {
            let rest = html.get(at + MARKER.len()..)?;
            let (value, tail) = rest.split_once('"')?;
            let tag_end = tail.find('>')?;
            let attributes = tail.get(..tag_end)?;
            (!attributes.contains("disabled")).then(|| value.to_owned())
        })
        .collect()
}
