//! Status enums for bookings and searches.

use serde::{Deserialize, Serialize};

/// Lifecycle of a stored booking.
///
/// There is no cancellation; a booking is confirmed when paid and reads as
/// completed once its departure date has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Completed,
}

impl BookingStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of the journey being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
    MultiCity,
}

impl TripType {
    /// All trip types in form order.
    pub const ALL: [Self; 3] = [Self::RoundTrip, Self::OneWay, Self::MultiCity];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneWay => "one-way",
            Self::RoundTrip => "round-trip",
            Self::MultiCity => "multi-city",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneWay => "One Way",
            Self::RoundTrip => "Round Trip",
            Self::MultiCity => "Multi-City",
        }
    }

    /// Parse a form value, defaulting to round trip.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "one-way" => Self::OneWay,
            "multi-city" => Self::MultiCity,
            _ => Self::RoundTrip,
        }
    }

    /// Whether a return date is part of this trip.
    #[must_use]
    pub const fn needs_return(self) -> bool {
        matches!(self, Self::RoundTrip)
    }
}
