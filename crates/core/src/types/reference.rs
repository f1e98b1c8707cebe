//! Booking reference codes.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A six-character booking reference such as `K3X9QA`.
///
/// References are random and never checked for collisions; they only need to
/// be distinct enough for a visitor to tell their bookings apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// Number of characters in a reference.
    pub const LENGTH: usize = 6;

    /// Generate a fresh reference from upper-case letters and digits.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..Self::LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                char::from(ALPHABET.get(idx).copied().unwrap_or(b'X'))
            })
            .collect();
        Self(code)
    }

    /// Wrap an existing reference, e.g. one of the demo bookings.
    ///
    /// Returns `None` unless the input is six upper-case letters or digits.
    #[must_use]
    pub fn from_existing(code: &str) -> Option<Self> {
        let valid = code.len() == Self::LENGTH
            && code
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
        valid.then(|| Self(code.to_owned()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
