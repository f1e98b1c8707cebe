//! Aircraft seat maps.
//!
//! Every booking draws a fresh seat map: occupancy is random and is not
//! shared between visitors or checked against the flight's seat count.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{CabinClass, SeatId};

/// Row span, column letters and occupancy probability of one cabin.
struct CabinLayout {
    cabin: CabinClass,
    rows: std::ops::RangeInclusive<u8>,
    columns: &'static [char],
    occupied_probability: f64,
}

const LAYOUT: [CabinLayout; 3] = [
    CabinLayout {
        cabin: CabinClass::Economy,
        rows: 20..=30,
        columns: &['A', 'B', 'C', 'D', 'E', 'F'],
        occupied_probability: 0.3,
    },
    CabinLayout {
        cabin: CabinClass::Business,
        rows: 10..=12,
        columns: &['A', 'C', 'D', 'F'],
        occupied_probability: 0.5,
    },
    CabinLayout {
        cabin: CabinClass::First,
        rows: 1..=2,
        columns: &['A', 'D'],
        occupied_probability: 0.7,
    },
];

/// Why a seat cannot be chosen.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatError {
    #[error("seat {0} does not exist on this aircraft")]
    Unknown(SeatId),
    #[error("seat {0} is already taken")]
    Occupied(SeatId),
}

/// One seat on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub cabin: CabinClass,
    pub occupied: bool,
}

/// All seats on one aircraft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMap {
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Draw a seat map with random occupancy.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut seats = Vec::new();
        for layout in &LAYOUT {
            for row in layout.rows.clone() {
                for &column in layout.columns {
                    let Ok(id) = SeatId::new(row, column) else {
                        continue;
                    };
                    seats.push(Seat {
                        id,
                        cabin: layout.cabin,
                        occupied: rng.random_bool(layout.occupied_probability),
                    });
                }
            }
        }
        Self { seats }
    }

    /// Build a map from explicit seats.
    #[must_use]
    pub const fn from_seats(seats: Vec<Seat>) -> Self {
        Self { seats }
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    /// Seats in one cabin, front row first.
    pub fn seats_in(&self, cabin: CabinClass) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(move |s| s.cabin == cabin)
    }

    /// Seats in one cabin grouped by row, front row first.
    #[must_use]
    pub fn rows_in(&self, cabin: CabinClass) -> Vec<Vec<Seat>> {
        let mut rows: Vec<Vec<Seat>> = Vec::new();
        for seat in self.seats_in(cabin) {
            match rows.last_mut() {
                Some(row) if row.first().is_some_and(|s| s.id.row() == seat.id.row()) => {
                    row.push(*seat);
                }
                _ => rows.push(vec![*seat]),
            }
        }
        rows
    }

    #[must_use]
    pub fn get(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    /// Check that a seat exists and is free.
    ///
    /// # Errors
    ///
    /// Returns [`SeatError::Unknown`] or [`SeatError::Occupied`].
    pub fn select(&self, id: SeatId) -> Result<Seat, SeatError> {
        let seat = self.get(id).ok_or(SeatError::Unknown(id))?;
        if seat.occupied {
            return Err(SeatError::Occupied(id));
        }
        Ok(*seat)
    }

    /// Number of free seats in a cabin.
    #[must_use]
    pub fn available_in(&self, cabin: CabinClass) -> usize {
        self.seats_in(cabin).filter(|s| !s.occupied).count()
    }
}
