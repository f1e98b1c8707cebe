//! Random flight catalog generation.
//!
//! The site has no inventory source. At startup it generates a catalog of
//! flights between every ordered pair of airports in the route network and
//! serves searches from that in-memory list for the life of the process.

use chrono::{Duration, NaiveTime};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::catalog::{AIRLINES, Airline, Amenity, route_network};
use crate::flight::{Endpoint, Flight, FlightId};
use crate::types::Price;

/// Aircraft types assigned to generated flights.
pub const AIRCRAFT: [&str; 2] = ["Boeing 737", "Airbus A320"];

/// Flights generated per ordered airport pair.
const FLIGHTS_PER_ROUTE: std::ops::RangeInclusive<usize> = 3..=5;

/// The generated flights, in generation order.
#[derive(Debug, Clone, Default)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
}

impl FlightCatalog {
    /// Generate a full catalog over the route network.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            flights: generate_catalog(rng),
        }
    }

    /// Wrap an explicit list of flights.
    #[must_use]
    pub const fn from_flights(flights: Vec<Flight>) -> Self {
        Self { flights }
    }

    /// All flights in generation order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Find a flight by id.
    #[must_use]
    pub fn get(&self, id: &FlightId) -> Option<&Flight> {
        self.flights.iter().find(|f| &f.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}

/// Generate flights between every ordered pair of distinct route airports.
pub fn generate_catalog<R: Rng + ?Sized>(rng: &mut R) -> Vec<Flight> {
    let network = route_network();
    let mut flights = Vec::new();

    for origin in network {
        for destination in network {
            if origin.code == destination.code {
                continue;
            }
            let count = rng.random_range(FLIGHTS_PER_ROUTE);
            for index in 0..count {
                let departure = random_departure(rng);
                let duration_minutes = random_duration(rng);
                let (arrival, _) =
                    departure.overflowing_add_signed(Duration::minutes(i64::from(duration_minutes)));
                let airline = random_airline(rng);
                let flight_number =
                    format!("{} {}", airline.designator(), rng.random_range(1000_u16..10_000));

                flights.push(Flight {
                    id: FlightId::for_route(origin.code, destination.code, index),
                    flight_number,
                    airline,
                    departure: Endpoint {
                        airport: origin.code,
                        city: origin.city.to_owned(),
                        time: departure,
                    },
                    arrival: Endpoint {
                        airport: destination.code,
                        city: destination.city.to_owned(),
                        time: arrival,
                    },
                    duration_minutes,
                    stops: random_stops(rng),
                    price: Price::usd(rng.random_range(120..950)),
                    aircraft: random_aircraft(rng),
                    amenities: random_amenities(rng),
                    seats_available: rng.random_range(1..=30),
                });
            }
        }
    }

    flights
}

fn random_airline<R: Rng + ?Sized>(rng: &mut R) -> Airline {
    AIRLINES
        .choose(rng)
        .map_or_else(|| Airline::from_row(AIRLINES[0]), |row| Airline::from_row(*row))
}

fn random_aircraft<R: Rng + ?Sized>(rng: &mut R) -> String {
    let [boeing, airbus] = AIRCRAFT;
    if rng.random_bool(0.5) { boeing } else { airbus }.to_owned()
}

fn random_departure<R: Rng + ?Sized>(rng: &mut R) -> NaiveTime {
    let hour = rng.random_range(6..=21);
    let minute = rng.random_range(0..60);
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Block time in minutes: at least one hour, at most five hours 59.
fn random_duration<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    let hours = (rng.random_range(0_u32..5) + rng.random_range(0_u32..2)).max(1);
    let minutes = rng.random_range(0..60);
    hours * 60 + minutes
}

fn random_stops<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    if rng.random_bool(0.6) {
        0
    } else if rng.random_bool(0.9) {
        1
    } else {
        2
    }
}

/// Between one and five draws from the amenity list, duplicates dropped.
fn random_amenities<R: Rng + ?Sized>(rng: &mut R) -> Vec<Amenity> {
    let draws = rng.random_range(1..=5);
    let mut amenities = Vec::with_capacity(draws);
    for _ in 0..draws {
        if let Some(&amenity) = Amenity::ALL.choose(rng)
            && !amenities.contains(&amenity)
        {
            amenities.push(amenity);
        }
    }
    amenities
}
