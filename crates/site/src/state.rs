//! Application state shared across handlers.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wanderlust_core::generator::FlightCatalog;

use crate::config::SiteConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The flight catalog is
/// generated once at startup and never changes afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    catalog: FlightCatalog,
}

impl AppState {
    /// Create the state, generating the flight catalog.
    ///
    /// Uses `config.catalog_seed` when set so the same flights come back
    /// on every restart.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let catalog = match config.catalog_seed {
            Some(seed) => FlightCatalog::generate(&mut StdRng::seed_from_u64(seed)),
            None => FlightCatalog::generate(&mut rand::rng()),
        };
        tracing::info!(
            flights = catalog.len(),
            seeded = config.catalog_seed.is_some(),
            "Flight catalog generated"
        );
        Self::with_catalog(config, catalog)
    }

    /// Create the state around an existing catalog.
    #[must_use]
    pub fn with_catalog(config: SiteConfig, catalog: FlightCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the generated flights.
    #[must_use]
    pub fn catalog(&self) -> &FlightCatalog {
        &self.inner.catalog
    }
}
