//! IATA airport codes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`AirportCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AirportCodeError {
    /// The code is not exactly three characters long.
    #[error("airport code must be exactly 3 letters (got {0})")]
    Length(usize),
    /// The code contains something other than ASCII letters.
    #[error("airport code must contain only letters")]
    NotAlphabetic,
}

/// A three-letter IATA airport code, stored upper-case.
///
/// ```
/// use wanderlust_core::AirportCode;
///
/// let code: AirportCode = "del".parse().unwrap();
/// assert_eq!(code.as_str(), "DEL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse a code, accepting any letter case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error unless the trimmed input is exactly three ASCII letters.
    pub fn parse(s: &str) -> Result<Self, AirportCodeError> {
        let s = s.trim();
        let bytes: [u8; 3] = s
            .as_bytes()
            .try_into()
            .map_err(|_| AirportCodeError::Length(s.chars().count()))?;
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(AirportCodeError::NotAlphabetic);
        }
        Ok(Self(bytes.map(|b| b.to_ascii_uppercase())))
    }

    /// Build a code from a static literal in the catalog tables.
    ///
    /// Only called with known-good upper-case literals.
    pub(crate) const fn from_static(s: &'static str) -> Self {
        let b = s.as_bytes();
        Self([b[0], b[1], b[2]])
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Always ASCII by construction.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AirportCode {
    type Err = AirportCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = AirportCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.as_str().to_owned()
    }
}
