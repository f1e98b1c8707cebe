//! Flight records.

use core::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::catalog::{Airline, Amenity};
use crate::types::{AirportCode, Price};

/// Identifier of a generated flight, e.g. `flight-DEL-BOM-0`.
///
/// Unique within one generated catalog only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlightId(String);

impl FlightId {
    /// Identifier for the `index`-th flight on a route.
    #[must_use]
    pub fn for_route(origin: AirportCode, destination: AirportCode, index: usize) -> Self {
        Self(format!("flight-{origin}-{destination}-{index}"))
    }

    /// Wrap a raw identifier taken from a URL.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One end of a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub airport: AirportCode,
    pub city: String,
    /// Local wall-clock time; flights carry no date of their own.
    pub time: NaiveTime,
}

impl Endpoint {
    /// Time formatted as `HH:MM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }
}

/// A scheduled flight offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub airline: Airline,
    pub flight_number: String,
    pub departure: Endpoint,
    pub arrival: Endpoint,
    /// Block time in minutes.
    pub duration_minutes: u32,
    pub stops: u8,
    pub price: Price,
    pub aircraft: String,
    pub amenities: Vec<Amenity>,
    pub seats_available: u8,
}

impl Flight {
    /// Duration formatted as `3h 15m`.
    #[must_use]
    pub fn duration_label(&self) -> String {
        format!(
            "{}h {}m",
            self.duration_minutes / 60,
            self.duration_minutes % 60
        )
    }

    /// `Direct`, `1 Stop` or `N Stops`.
    #[must_use]
    pub fn stops_label(&self) -> String {
        match self.stops {
            0 => "Direct".to_owned(),
            1 => "1 Stop".to_owned(),
            n => format!("{n} Stops"),
        }
    }

    /// Whether the flight lands on the day after it leaves.
    #[must_use]
    pub fn arrives_next_day(&self) -> bool {
        self.arrival.time < self.departure.time
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::catalog::{AIRLINES, city_for};

    /// Build a flight with the fields tests care about.
    #[allow(clippy::unwrap_used, clippy::too_many_arguments)]
    pub fn flight(
        index: usize,
        origin: &str,
        destination: &str,
        airline: usize,
        departure: (u32, u32),
        duration_minutes: u32,
        stops: u8,
        price: i64,
    ) -> Flight {
        let origin = AirportCode::parse(origin).unwrap();
        let destination = AirportCode::parse(destination).unwrap();
        let dep = NaiveTime::from_hms_opt(departure.0, departure.1, 0).unwrap();
        let (arr, _) = dep.overflowing_add_signed(chrono::Duration::minutes(i64::from(
            duration_minutes,
        )));
        Flight {
            id: FlightId::for_route(origin, destination, index),
            airline: Airline::from_row(AIRLINES[airline]),
            flight_number: format!("XX {}", 1000 + index),
            departure: Endpoint {
                airport: origin,
                city: city_for(origin),
                time: dep,
            },
            arrival: Endpoint {
                airport: destination,
                city: city_for(destination),
                time: arr,
            },
            duration_minutes,
            stops,
            price: Price::usd(price),
            aircraft: "Boeing 737".to_owned(),
            amenities: vec![Amenity::WiFi],
            seats_available: 10,
        }
    }
}
