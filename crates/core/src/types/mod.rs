//! Core types for WanderlustWings.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod airport;
pub mod email;
pub mod price;
pub mod reference;
pub mod seat;
pub mod status;

pub use airport::{AirportCode, AirportCodeError};
pub use email::{Email, EmailError};
pub use price::{CurrencyCode, Price};
pub use reference::BookingReference;
pub use seat::{CabinClass, SeatId, SeatIdError};
pub use status::{BookingStatus, TripType};
