//! Seat identifiers and cabin classes.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SeatId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatIdError {
    /// The row number is missing, zero, or above 99.
    #[error("seat row must be a number between 1 and 99")]
    InvalidRow,
    /// The column is not a single letter A-K.
    #[error("seat column must be a single letter A-K")]
    InvalidColumn,
}

/// A seat position such as `12A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u8,
    column: char,
}

impl SeatId {
    /// Create a seat id.
    ///
    /// # Errors
    ///
    /// Returns an error if the row is outside 1-99 or the column is not A-K.
    pub fn new(row: u8, column: char) -> Result<Self, SeatIdError> {
        if !(1..=99).contains(&row) {
            return Err(SeatIdError::InvalidRow);
        }
        let column = column.to_ascii_uppercase();
        if !('A'..='K').contains(&column) {
            return Err(SeatIdError::InvalidColumn);
        }
        Ok(Self { row, column })
    }

    /// Parse `"12A"`-style identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the digits or the trailing letter are invalid.
    pub fn parse(s: &str) -> Result<Self, SeatIdError> {
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars.next_back().ok_or(SeatIdError::InvalidColumn)?;
        let row = chars
            .as_str()
            .parse::<u8>()
            .map_err(|_| SeatIdError::InvalidRow)?;
        Self::new(row, column)
    }

    /// Row number.
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Column letter.
    #[must_use]
    pub const fn column(&self) -> char {
        self.column
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl std::str::FromStr for SeatId {
    type Err = SeatIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SeatId> for String {
    fn from(id: SeatId) -> Self {
        id.to_string()
    }
}

/// Aircraft cabin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    First,
    Business,
    #[default]
    Economy,
}

impl CabinClass {
    /// All cabins, front of the aircraft first.
    pub const ALL: [Self; 3] = [Self::First, Self::Business, Self::Economy];

    /// Cabin a row belongs to: rows below 10 are First, below 20 Business.
    #[must_use]
    pub const fn for_row(row: u8) -> Self {
        if row < 10 {
            Self::First
        } else if row < 20 {
            Self::Business
        } else {
            Self::Economy
        }
    }

    /// Extra charge on top of the fare for a seat in this cabin.
    #[must_use]
    pub fn surcharge(self) -> Decimal {
        match self {
            Self::First => Decimal::from(150),
            Self::Business => Decimal::from(50),
            Self::Economy => Decimal::ZERO,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::First => "First Class",
            Self::Business => "Business",
            Self::Economy => "Economy",
        }
    }

    /// Stable lowercase key used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Business => "business",
            Self::Economy => "economy",
        }
    }

    /// Parse the query string key, defaulting to Economy.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Self::First,
            "business" => Self::Business,
            _ => Self::Economy,
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let seat = SeatId::parse("12a").unwrap();
        assert_eq!(seat.row(), 12);
        assert_eq!(seat.column(), 'A');
        assert_eq!(seat.to_string(), "12A");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(SeatId::parse(""), Err(SeatIdError::InvalidColumn));
        assert_eq!(SeatId::parse("A"), Err(SeatIdError::InvalidRow));
        assert_eq!(SeatId::parse("0A"), Err(SeatIdError::InvalidRow));
        assert_eq!(SeatId::parse("12Z"), Err(SeatIdError::InvalidColumn));
        assert_eq!(SeatId::parse("100A"), Err(SeatIdError::InvalidRow));
    }

    #[test]
    fn test_cabin_for_row() {
        assert_eq!(CabinClass::for_row(1), CabinClass::First);
        assert_eq!(CabinClass::for_row(12), CabinClass::Business);
        assert_eq!(CabinClass::for_row(20), CabinClass::Economy);
    }

    #[test]
    fn test_surcharges() {
        assert_eq!(CabinClass::First.surcharge(), Decimal::from(150));
        assert_eq!(CabinClass::Business.surcharge(), Decimal::from(50));
        assert_eq!(CabinClass::Economy.surcharge(), Decimal::ZERO);
    }

    #[test]
    fn test_cabin_parse_defaults_to_economy() {
        assert_eq!(CabinClass::parse("First"), CabinClass::First);
        assert_eq!(CabinClass::parse("nonsense"), CabinClass::Economy);
    }
}
