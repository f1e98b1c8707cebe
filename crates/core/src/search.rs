//! Flight search: criteria validation, route matching, filters and sorting.
//!
//! A search runs in three stages:
//!
//! 1. [`SearchCriteria::validate`] checks the form and reports the first
//!    missing field.
//! 2. [`route_flights`] narrows the catalog to the requested route.
//! 3. [`apply`] runs the result-page filters and sort over the route flights.

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::flight::Flight;
use crate::generator::FlightCatalog;
use crate::types::{AirportCode, TripType};

/// Maximum passengers the search form offers.
pub const MAX_PASSENGERS: u8 = 5;

/// Headroom added above the dearest route fare in the initial price range.
const PRICE_HEADROOM: i64 = 50;

// =============================================================================
// Criteria
// =============================================================================

/// Cabin requested on the search form.
///
/// Only used to echo the request back; generated flights carry no fare
/// classes and the seat map decides the cabin actually flown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl TravelClass {
    pub const ALL: [Self; 4] = [
        Self::Economy,
        Self::PremiumEconomy,
        Self::Business,
        Self::First,
    ];

    /// Display label, also used as the form value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::PremiumEconomy => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First",
        }
    }

    /// Parse a form value, defaulting to Economy.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .unwrap_or_default()
    }
}

/// Why a search form was rejected.
///
/// The `Display` text is the toast title; [`SearchError::description`] is the
/// toast body.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    #[error("Missing origin")]
    MissingOrigin,
    #[error("Missing destination")]
    MissingDestination,
    #[error("Missing departure date")]
    MissingDepartDate,
    #[error("Missing return date")]
    MissingReturnDate,
}

impl SearchError {
    /// Longer explanation shown under the title.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingOrigin => "Please select a departure city",
            Self::MissingDestination => "Please select an arrival city",
            Self::MissingDepartDate => "Please select when you want to depart",
            Self::MissingReturnDate => "Please select when you want to return",
        }
    }
}

/// What the visitor asked for on the search form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub trip_type: TripType,
    pub origin: Option<AirportCode>,
    pub destination: Option<AirportCode>,
    pub depart_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: u8,
    pub travel_class: TravelClass,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            trip_type: TripType::default(),
            origin: None,
            destination: None,
            depart_date: None,
            return_date: None,
            passengers: 1,
            travel_class: TravelClass::default(),
        }
    }
}

impl SearchCriteria {
    /// Check the required fields in form order.
    ///
    /// A return date on anything but a round trip is dropped rather than
    /// rejected, and the passenger count is clamped to the form's range.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(mut self) -> Result<Self, SearchError> {
        if self.origin.is_none() {
            return Err(SearchError::MissingOrigin);
        }
        if self.destination.is_none() {
            return Err(SearchError::MissingDestination);
        }
        if self.depart_date.is_none() {
            return Err(SearchError::MissingDepartDate);
        }
        if self.trip_type.needs_return() {
            if self.return_date.is_none() {
                return Err(SearchError::MissingReturnDate);
            }
        } else {
            self.return_date = None;
        }
        self.passengers = self.passengers.clamp(1, MAX_PASSENGERS);
        Ok(self)
    }

    /// `"DEL to BOM"`, or `"All Flights"` when either end is open.
    #[must_use]
    pub fn route_label(&self) -> String {
        match (self.origin, self.destination) {
            (Some(origin), Some(destination)) => format!("{origin} to {destination}"),
            _ => "All Flights".to_owned(),
        }
    }
}

/// Flights on a route, in catalog order. An open end matches anything.
#[must_use]
pub fn route_flights(
    catalog: &FlightCatalog,
    origin: Option<AirportCode>,
    destination: Option<AirportCode>,
) -> Vec<&Flight> {
    catalog
        .flights()
        .iter()
        .filter(|f| origin.is_none_or(|o| f.departure.airport == o))
        .filter(|f| destination.is_none_or(|d| f.arrival.airport == d))
        .collect()
}

/// Airline names across the whole catalog, in first-seen order.
#[must_use]
pub fn available_airlines(catalog: &FlightCatalog) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for flight in catalog.flights() {
        if !names.contains(&flight.airline.name) {
            names.push(flight.airline.name.clone());
        }
    }
    names
}

// =============================================================================
// Filters
// =============================================================================

/// Inclusive fare bounds in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0, max: 1000 }
    }
}

impl PriceRange {
    /// Range shown when results first load: cheapest fare up to the dearest
    /// plus some headroom.
    #[must_use]
    pub fn initial(flights: &[&Flight]) -> Self {
        Self::bounds(flights).map_or_else(Self::default, |(min, max)| Self {
            min,
            max: max + PRICE_HEADROOM,
        })
    }

    /// Range restored by "Reset": exactly the cheapest and dearest fares.
    #[must_use]
    pub fn reset(flights: &[&Flight]) -> Self {
        Self::bounds(flights).map_or_else(Self::default, |(min, max)| Self { min, max })
    }

    fn bounds(flights: &[&Flight]) -> Option<(i64, i64)> {
        let prices = flights.iter().map(|f| f.price.whole_units());
        let min = prices.clone().min()?;
        let max = prices.max()?;
        Some((min, max))
    }

    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        amount >= Decimal::from(self.min) && amount <= Decimal::from(self.max)
    }
}

/// Stop-count filter buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopBucket {
    Direct,
    One,
    TwoPlus,
}

impl StopBucket {
    pub const ALL: [Self; 3] = [Self::Direct, Self::One, Self::TwoPlus];

    #[must_use]
    pub const fn for_stops(stops: u8) -> Self {
        match stops {
            0 => Self::Direct,
            1 => Self::One,
            _ => Self::TwoPlus,
        }
    }

    /// Query string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "0",
            Self::One => "1",
            Self::TwoPlus => "2",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::One => "1 Stop",
            Self::TwoPlus => "2+ Stops",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s.trim())
    }
}

/// Departure time-of-day windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// 05:00 until noon.
    Morning,
    /// Noon until 17:00.
    Afternoon,
    /// 17:00 until 21:00.
    Evening,
    /// Everything else.
    Night,
}

impl DayPeriod {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    #[must_use]
    pub fn for_time(time: NaiveTime) -> Self {
        match time.hour() {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Result-page filters. Empty sets match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightFilters {
    pub price: PriceRange,
    pub airlines: Vec<String>,
    pub stops: Vec<StopBucket>,
    pub departure_periods: Vec<DayPeriod>,
}

impl FlightFilters {
    /// Filters restored by "Reset" for the given route flights.
    #[must_use]
    pub fn reset(flights: &[&Flight]) -> Self {
        Self {
            price: PriceRange::reset(flights),
            ..Self::default()
        }
    }

    /// Whether a flight passes every filter.
    #[must_use]
    pub fn matches(&self, flight: &Flight) -> bool {
        self.price.contains(flight.price.amount)
            && (self.airlines.is_empty() || self.airlines.contains(&flight.airline.name))
            && (self.stops.is_empty() || self.stops.contains(&StopBucket::for_stops(flight.stops)))
            && (self.departure_periods.is_empty()
                || self
                    .departure_periods
                    .contains(&DayPeriod::for_time(flight.departure.time)))
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Result ordering. All keys sort ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Price,
    Duration,
    Departure,
    Arrival,
}

impl SortKey {
    pub const ALL: [Self; 4] = [Self::Price, Self::Duration, Self::Departure, Self::Arrival];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Departure => "departure",
            Self::Arrival => "arrival",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price (Lowest First)",
            Self::Duration => "Duration (Shortest First)",
            Self::Departure => "Departure (Earliest First)",
            Self::Arrival => "Arrival (Earliest First)",
        }
    }

    /// Parse a query value; anything unrecognised sorts by price.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s.trim())
            .unwrap_or_default()
    }

    /// Stable sort of `flights` by this key.
    pub fn sort(self, flights: &mut [&Flight]) {
        match self {
            Self::Price => flights.sort_by_key(|f| f.price.amount),
            Self::Duration => flights.sort_by_key(|f| f.duration_minutes),
            Self::Departure => flights.sort_by_key(|f| f.departure.time),
            Self::Arrival => flights.sort_by_key(|f| f.arrival.time),
        }
    }
}

/// Filter and sort route flights for display.
#[must_use]
pub fn apply<'a>(flights: &[&'a Flight], filters: &FlightFilters, sort: SortKey) -> Vec<&'a Flight> {
    let mut results: Vec<&Flight> = flights
        .iter()
        .copied()
        .filter(|f| filters.matches(f))
        .collect();
    sort.sort(&mut results);
    results
}
