//! WanderlustWings Core - Flight booking domain library.
//!
//! This crate holds everything the site and the CLI share:
//! - `site` - Public booking website
//! - `cli` - Command-line catalog inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no sessions,
//! no HTTP. Randomness is always injected as a `rand::Rng` so generators and
//! booking references are reproducible under a seeded RNG.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, prices, airport codes, seats and references
//! - [`catalog`] - Static airport and airline tables
//! - [`flight`] - Flight records
//! - [`generator`] - Random flight catalog generation
//! - [`search`] - Search criteria validation and the filter/sort pipeline
//! - [`seats`] - Aircraft seat maps
//! - [`passenger`] / [`payment`] - Form validation
//! - [`booking`] - The booking wizard and stored booking records
//! - [`user`] - Demo user identity

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod booking;
pub mod catalog;
pub mod flight;
pub mod generator;
pub mod passenger;
pub mod payment;
pub mod search;
pub mod seats;
pub mod types;
pub mod user;
pub mod validation;

pub use types::*;
