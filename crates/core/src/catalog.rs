//! Static reference data: airports, airlines and amenities.
//!
//! The search form offers every airport in [`AIRPORTS`]; the flight generator
//! only connects the first [`ROUTE_NETWORK_SIZE`] of them, so Hong Kong and
//! Sydney are selectable but never have flights.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::types::AirportCode;

/// An airport offered by the search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airport {
    pub code: AirportCode,
    pub city: &'static str,
    pub country: &'static str,
    pub name: &'static str,
}

const fn airport(
    code: &'static str,
    city: &'static str,
    country: &'static str,
    name: &'static str,
) -> Airport {
    Airport {
        code: AirportCode::from_static(code),
        city,
        country,
        name,
    }
}

/// Airports in search-form order, Indian cities first.
pub static AIRPORTS: [Airport; 20] = [
    airport("DEL", "Delhi", "India", "Indira Gandhi International Airport"),
    airport("BOM", "Mumbai", "India", "Chhatrapati Shivaji International Airport"),
    airport("MAA", "Chennai", "India", "Chennai International Airport"),
    airport("BLR", "Bangalore", "India", "Kempegowda International Airport"),
    airport("CCU", "Kolkata", "India", "Netaji Subhash Chandra Bose International Airport"),
    airport("HYD", "Hyderabad", "India", "Rajiv Gandhi International Airport"),
    airport("COK", "Kochi", "India", "Cochin International Airport"),
    airport("PNQ", "Pune", "India", "Pune Airport"),
    airport("GOI", "Goa", "India", "Dabolim Airport"),
    airport("AMD", "Ahmedabad", "India", "Sardar Vallabhbhai Patel International Airport"),
    airport("LKO", "Lucknow", "India", "Chaudhary Charan Singh International Airport"),
    airport("JAI", "Jaipur", "India", "Jaipur International Airport"),
    airport("JFK", "New York", "USA", "John F. Kennedy International Airport"),
    airport("LAX", "Los Angeles", "USA", "Los Angeles International Airport"),
    airport("LHR", "London", "UK", "Heathrow Airport"),
    airport("CDG", "Paris", "France", "Charles de Gaulle Airport"),
    airport("DXB", "Dubai", "UAE", "Dubai International Airport"),
    airport("SIN", "Singapore", "Singapore", "Changi Airport"),
    airport("HKG", "Hong Kong", "Hong Kong", "Hong Kong International Airport"),
    airport("SYD", "Sydney", "Australia", "Sydney Airport"),
];

/// Number of leading [`AIRPORTS`] that the generator connects with flights.
pub const ROUTE_NETWORK_SIZE: usize = 18;

/// Airports served by generated flights.
#[must_use]
pub fn route_network() -> &'static [Airport] {
    AIRPORTS.get(..ROUTE_NETWORK_SIZE).unwrap_or(&AIRPORTS)
}

/// Look up an airport by code.
#[must_use]
pub fn airport_by_code(code: AirportCode) -> Option<&'static Airport> {
    AIRPORTS.iter().find(|a| a.code == code)
}

/// City name for an airport code, falling back to the code itself.
#[must_use]
pub fn city_for(code: AirportCode) -> String {
    airport_by_code(code).map_or_else(|| code.to_string(), |a| a.city.to_owned())
}

/// An operating airline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Airline {
    pub name: String,
    pub logo_url: String,
}

/// Airline table as `(name, logo)` pairs.
pub const AIRLINES: [(&str, &str); 9] = [
    ("Air India", "https://cdn-icons-png.flaticon.com/512/984/984267.png"),
    ("IndiGo", "https://cdn-icons-png.flaticon.com/512/984/984234.png"),
    ("SpiceJet", "https://cdn-icons-png.flaticon.com/512/984/984291.png"),
    ("Vistara", "https://cdn-icons-png.flaticon.com/512/984/984223.png"),
    ("Go Air", "https://cdn-icons-png.flaticon.com/512/984/984228.png"),
    ("Emirates", "https://cdn-icons-png.flaticon.com/512/984/984267.png"),
    ("Lufthansa", "https://cdn-icons-png.flaticon.com/512/984/984234.png"),
    ("British Airways", "https://cdn-icons-png.flaticon.com/512/984/984291.png"),
    ("Air France", "https://cdn-icons-png.flaticon.com/512/984/984223.png"),
];

impl Airline {
    /// Owned copy of one [`AIRLINES`] row.
    #[must_use]
    pub fn from_row((name, logo_url): (&str, &str)) -> Self {
        Self {
            name: name.to_owned(),
            logo_url: logo_url.to_owned(),
        }
    }

    /// Look up an airline by display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        AIRLINES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|row| Self::from_row(*row))
    }

    /// Two-letter designator used in flight numbers (`Air India` is `AI`).
    #[must_use]
    pub fn designator(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// On-board amenity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amenity {
    WiFi,
    Meals,
    Entertainment,
    Power,
    Usb,
    ExtraLegroom,
}

impl Amenity {
    /// All amenities in draw order.
    pub const ALL: [Self; 6] = [
        Self::WiFi,
        Self::Meals,
        Self::Entertainment,
        Self::Power,
        Self::Usb,
        Self::ExtraLegroom,
    ];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WiFi => "WiFi",
            Self::Meals => "Meals",
            Self::Entertainment => "Entertainment",
            Self::Power => "Power",
            Self::Usb => "USB",
            Self::ExtraLegroom => "Legroom+",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_codes_are_unique() {
        let mut codes: Vec<_> = AIRPORTS.iter().map(|a| a.code).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), AIRPORTS.len());
    }

    #[test]
    fn test_route_network_excludes_unserved_airports() {
        let network = route_network();
        assert_eq!(network.len(), 18);
        assert!(network.iter().all(|a| a.code.as_str() != "SYD"));
        assert!(network.iter().all(|a| a.code.as_str() != "HKG"));
    }

    #[test]
    fn test_lookup() {
        let code = AirportCode::parse("cdg").unwrap();
        assert_eq!(airport_by_code(code).unwrap().city, "Paris");
        assert_eq!(city_for(AirportCode::parse("XXX").unwrap()), "XXX");
    }

    #[test]
    fn test_designator() {
        let airline = Airline::from_row(AIRLINES[7]);
        assert_eq!(airline.designator(), "BR");
        assert_eq!(Airline::from_row(AIRLINES[1]).designator(), "IN");
    }

    #[test]
    fn test_airline_by_name() {
        assert_eq!(Airline::by_name("Vistara").unwrap().name, "Vistara");
        assert!(Airline::by_name("AirJet").is_none());
    }
}
