//! Subcommand implementations.

pub mod airports;
pub mod flights;
pub mod seats;

use rand::SeedableRng;
use rand::rngs::StdRng;
use wanderlust_core::types::AirportCodeError;

/// Errors a subcommand can fail with.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("invalid airport: {0}")]
    Airport(#[from] AirportCodeError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A seeded RNG when a seed is given, otherwise a fresh one.
pub fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64)
}
