//! The booking wizard and stored bookings.
//!
//! A [`BookingDraft`] walks through four steps:
//!
//! ```text
//! Seat ──choose_seat──▶ Passenger ──submit_passenger──▶ Payment ──complete_payment──▶ Confirmation
//!   ◀────────back────────    ◀──────────back──────────
//! ```
//!
//! Each transition only succeeds from its own step, so a replayed or
//! out-of-order form post cannot skip ahead. Completing payment produces a
//! [`Booking`]; the dashboard works with the lighter [`BookingRecord`].

use chrono::{Days, NaiveDate, NaiveTime};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::flight::Flight;
use crate::passenger::PassengerDetails;
use crate::payment::PaymentDetails;
use crate::seats::{Seat, SeatError, SeatMap};
use crate::types::{AirportCode, BookingReference, BookingStatus, Price, SeatId};

/// Fee for one extra checked bag.
pub const BAGGAGE_FEE: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    #[default]
    Seat,
    Passenger,
    Payment,
    Confirmation,
}

impl BookingStep {
    /// Page heading for the step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Seat => "Select Your Seat",
            Self::Passenger => "Passenger Information",
            Self::Payment => "Payment Details",
            Self::Confirmation => "Booking Confirmation",
        }
    }

    /// 1-based position in the wizard.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Seat => 1,
            Self::Passenger => 2,
            Self::Payment => 3,
            Self::Confirmation => 4,
        }
    }

    /// Progress bar fill in percent.
    #[must_use]
    pub const fn progress(self) -> u8 {
        self.number() * 25
    }

    /// The step "Back" returns to. Seat and Confirmation have none.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Passenger => Some(Self::Seat),
            Self::Payment => Some(Self::Passenger),
            Self::Seat | Self::Confirmation => None,
        }
    }
}

impl std::fmt::Display for BookingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingError {
    #[error("booking is at step '{current}', not '{expected}'")]
    WrongStep {
        expected: BookingStep,
        current: BookingStep,
    },
    #[error(transparent)]
    Seat(#[from] SeatError),
}

// =============================================================================
// Draft
// =============================================================================

/// A booking in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    flight: Flight,
    travel_date: NaiveDate,
    seat_map: SeatMap,
    seat: Option<Seat>,
    passenger: Option<PassengerDetails>,
    booking: Option<Booking>,
    step: BookingStep,
}

impl BookingDraft {
    /// Start booking `flight` for `travel_date` with a freshly drawn seat map.
    pub fn new<R: Rng + ?Sized>(flight: Flight, travel_date: NaiveDate, rng: &mut R) -> Self {
        Self::with_seat_map(flight, travel_date, SeatMap::generate(rng))
    }

    #[must_use]
    pub const fn with_seat_map(flight: Flight, travel_date: NaiveDate, seat_map: SeatMap) -> Self {
        Self {
            flight,
            travel_date,
            seat_map,
            seat: None,
            passenger: None,
            booking: None,
            step: BookingStep::Seat,
        }
    }

    #[must_use]
    pub const fn step(&self) -> BookingStep {
        self.step
    }

    #[must_use]
    pub const fn flight(&self) -> &Flight {
        &self.flight
    }

    #[must_use]
    pub const fn travel_date(&self) -> NaiveDate {
        self.travel_date
    }

    #[must_use]
    pub const fn seat_map(&self) -> &SeatMap {
        &self.seat_map
    }

    #[must_use]
    pub const fn seat(&self) -> Option<&Seat> {
        self.seat.as_ref()
    }

    #[must_use]
    pub const fn passenger(&self) -> Option<&PassengerDetails> {
        self.passenger.as_ref()
    }

    /// The confirmed booking, once payment has gone through.
    #[must_use]
    pub const fn booking(&self) -> Option<&Booking> {
        self.booking.as_ref()
    }

    fn expect_step(&self, expected: BookingStep) -> Result<(), BookingError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(BookingError::WrongStep {
                expected,
                current: self.step,
            })
        }
    }

    /// Cabin surcharge for the chosen seat, zero before one is chosen.
    #[must_use]
    pub fn seat_surcharge(&self) -> Decimal {
        self.seat.map_or(Decimal::ZERO, |s| s.cabin.surcharge())
    }

    /// Baggage fee if the passenger asked for an extra bag.
    #[must_use]
    pub fn baggage_fee(&self) -> Decimal {
        if self.passenger.as_ref().is_some_and(|p| p.add_baggage) {
            BAGGAGE_FEE
        } else {
            Decimal::ZERO
        }
    }

    /// Fare plus seat surcharge plus baggage.
    #[must_use]
    pub fn total(&self) -> Price {
        self.flight
            .price
            .plus(self.seat_surcharge())
            .plus(self.baggage_fee())
    }

    /// Pick a seat and move on to passenger details.
    ///
    /// # Errors
    ///
    /// Fails outside the seat step, or if the seat is unknown or taken.
    pub fn choose_seat(&mut self, id: SeatId) -> Result<Seat, BookingError> {
        self.expect_step(BookingStep::Seat)?;
        let seat = self.seat_map.select(id)?;
        self.seat = Some(seat);
        self.step = BookingStep::Passenger;
        Ok(seat)
    }

    /// Record passenger details and move on to payment.
    ///
    /// # Errors
    ///
    /// Fails outside the passenger step.
    pub fn submit_passenger(&mut self, details: PassengerDetails) -> Result<(), BookingError> {
        self.expect_step(BookingStep::Passenger)?;
        self.passenger = Some(details);
        self.step = BookingStep::Payment;
        Ok(())
    }

    /// Confirm the booking after a successful payment.
    ///
    /// # Errors
    ///
    /// Fails outside the payment step.
    pub fn complete_payment<R: Rng + ?Sized>(
        &mut self,
        payment: PaymentDetails,
        rng: &mut R,
        booked_on: NaiveDate,
    ) -> Result<Booking, BookingError> {
        self.expect_step(BookingStep::Payment)?;
        let (Some(seat), Some(passenger)) = (self.seat, self.passenger.clone()) else {
            return Err(BookingError::WrongStep {
                expected: BookingStep::Payment,
                current: self.step,
            });
        };

        let booking = Booking {
            reference: BookingReference::generate(rng),
            total: self.total(),
            flight: self.flight.clone(),
            travel_date: self.travel_date,
            seat: seat.id,
            passenger,
            payment,
            booked_on,
            status: BookingStatus::Confirmed,
        };
        self.booking = Some(booking.clone());
        self.step = BookingStep::Confirmation;
        Ok(booking)
    }

    /// Go back one step, keeping what was entered. Returns the new step.
    pub const fn back(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }
}

// =============================================================================
// Bookings
// =============================================================================

/// A paid booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub reference: BookingReference,
    pub flight: Flight,
    pub travel_date: NaiveDate,
    pub seat: SeatId,
    pub passenger: PassengerDetails,
    pub payment: PaymentDetails,
    pub total: Price,
    pub booked_on: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    /// Date the flight lands, one day later for overnight flights.
    #[must_use]
    pub fn arrival_date(&self) -> NaiveDate {
        if self.flight.arrives_next_day() {
            self.travel_date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.travel_date)
        } else {
            self.travel_date
        }
    }

    /// Dashboard summary of this booking.
    #[must_use]
    pub fn record(&self) -> BookingRecord {
        BookingRecord {
            reference: self.reference.clone(),
            airline: self.flight.airline.name.clone(),
            flight_number: self.flight.flight_number.clone(),
            origin: self.flight.departure.airport,
            origin_city: self.flight.departure.city.clone(),
            destination: self.flight.arrival.airport,
            destination_city: self.flight.arrival.city.clone(),
            date: self.travel_date,
            departure_time: self.flight.departure.time,
            arrival_time: self.flight.arrival.time,
            status: self.status,
            seat: Some(self.seat),
            passenger_name: Some(self.passenger.full_name()),
            total: Some(self.total),
        }
    }
}

/// One line on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub reference: BookingReference,
    pub airline: String,
    pub flight_number: String,
    pub origin: AirportCode,
    pub origin_city: String,
    pub destination: AirportCode,
    pub destination_city: String,
    pub date: NaiveDate,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub status: BookingStatus,
    pub seat: Option<SeatId>,
    pub passenger_name: Option<String>,
    pub total: Option<Price>,
}

impl BookingRecord {
    /// `"Aug 22, 2025"`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.date.format("%b %d, %Y").to_string()
    }

    /// Plain-text e-ticket for download.
    #[must_use]
    pub fn e_ticket(&self) -> String {
        let mut lines = vec![
            "WanderlustWings E-Ticket".to_owned(),
            "========================".to_owned(),
            format!("Booking reference: {}", self.reference),
            format!("Status:            {}", self.status),
            format!("Flight:            {} {}", self.airline, self.flight_number),
            format!("Date:              {}", self.date_label()),
            format!(
                "From:              {} ({}) at {}",
                self.origin_city,
                self.origin,
                self.departure_time.format("%H:%M")
            ),
            format!(
                "To:                {} ({}) at {}",
                self.destination_city,
                self.destination,
                self.arrival_time.format("%H:%M")
            ),
        ];
        if let Some(name) = &self.passenger_name {
            lines.push(format!("Passenger:         {name}"));
        }
        if let Some(seat) = self.seat {
            lines.push(format!("Seat:              {seat}"));
        }
        if let Some(total) = self.total {
            lines.push(format!("Total paid:        {total}"));
        }
        lines.push(String::new());
        lines.push("Please arrive at the airport at least 2 hours before departure.".to_owned());
        lines.join("\n") + "\n"
    }
}

/// Split records into upcoming (travel today or later, soonest first) and
/// past (most recent first). Past records always read as completed.
#[must_use]
pub fn partition(
    records: &[BookingRecord],
    today: NaiveDate,
) -> (Vec<BookingRecord>, Vec<BookingRecord>) {
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) =
        records.iter().cloned().partition(|r| r.date >= today);
    for record in &mut past {
        record.status = BookingStatus::Completed;
    }
    upcoming.sort_by_key(|r| (r.date, r.departure_time));
    past.sort_by_key(|r| std::cmp::Reverse((r.date, r.departure_time)));
    (upcoming, past)
}

/// Canned booking history shown to a visitor who just logged in.
///
/// Dates are relative to `today` so two trips are always ahead and two
/// behind.
#[must_use]
pub fn demo_bookings(today: NaiveDate) -> Vec<BookingRecord> {
    let rows: [(&str, &str, &str, &str, &str, i64, (u32, u32), (u32, u32)); 4] = [
        ("ABC123", "AirJet", "AJ 1234", "DEL", "BOM", 34, (8, 30), (11, 45)),
        ("DEF456", "SkyWings", "SW 5678", "BLR", "CCU", 58, (14, 20), (23, 5)),
        ("GHI789", "Global Airways", "GA 9012", "MAA", "HYD", -466, (6, 45), (12, 30)),
        ("JKL012", "IndiGo", "IG 5432", "DEL", "GOI", -652, (12, 15), (14, 45)),
    ];

    rows.into_iter()
        .filter_map(|(reference, airline, number, from, to, offset, dep, arr)| {
            let origin = AirportCode::parse(from).ok()?;
            let destination = AirportCode::parse(to).ok()?;
            let date = if offset >= 0 {
                today.checked_add_days(Days::new(offset.unsigned_abs()))?
            } else {
                today.checked_sub_days(Days::new(offset.unsigned_abs()))?
            };
            Some(BookingRecord {
                reference: BookingReference::from_existing(reference)?,
                airline: airline.to_owned(),
                flight_number: number.to_owned(),
                origin,
                origin_city: crate::catalog::city_for(origin),
                destination,
                destination_city: crate::catalog::city_for(destination),
                date,
                departure_time: NaiveTime::from_hms_opt(dep.0, dep.1, 0)?,
                arrival_time: NaiveTime::from_hms_opt(arr.0, arr.1, 0)?,
                status: if offset >= 0 {
                    BookingStatus::Confirmed
                } else {
                    BookingStatus::Completed
                },
                seat: None,
                passenger_name: None,
                total: None,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::flight::fixtures::flight;
    use crate::passenger::PassengerInput;
    use crate::payment::{PaymentInput, PaymentMethod};
    use crate::types::CabinClass;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seat(s: &str) -> SeatId {
        SeatId::parse(s).unwrap()
    }

    fn map() -> SeatMap {
        let seat = |id: &str, occupied| Seat {
            id: SeatId::parse(id).unwrap(),
            cabin: CabinClass::for_row(SeatId::parse(id).unwrap().row()),
            occupied,
        };
        SeatMap::from_seats(vec![
            seat("1A", false),
            seat("10C", false),
            seat("20A", false),
            seat("20B", true),
        ])
    }

    fn draft() -> BookingDraft {
        let flight = flight(0, "JFK", "LAX", 0, (8, 30), 195, 0, 299);
        BookingDraft::with_seat_map(flight, date("2025-08-15"), map())
    }

    fn passenger(add_baggage: bool) -> PassengerDetails {
        PassengerInput {
            title: "Mr".to_owned(),
            first_name: "Arjun".to_owned(),
            last_name: "Mehta".to_owned(),
            date_of_birth: "1985-02-20".to_owned(),
            email: "arjun@example.com".to_owned(),
            phone: "5551234".to_owned(),
            nationality: "Indian".to_owned(),
            add_baggage,
            ..PassengerInput::default()
        }
        .validate(date("2025-01-01"))
        .unwrap()
    }

    fn paypal() -> PaymentDetails {
        PaymentInput {
            method: PaymentMethod::PayPal,
            ..PaymentInput::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_step_metadata() {
        assert_eq!(BookingStep::Seat.title(), "Select Your Seat");
        assert_eq!(BookingStep::Payment.number(), 3);
        assert_eq!(BookingStep::Passenger.progress(), 50);
        assert_eq!(BookingStep::Confirmation.progress(), 100);
    }

    #[test]
    fn test_full_flow() {
        let mut draft = draft();
        assert_eq!(draft.total(), Price::usd(299));

        draft.choose_seat(seat("1A")).unwrap();
        assert_eq!(draft.step(), BookingStep::Passenger);
        assert_eq!(draft.total(), Price::usd(449));

        draft.submit_passenger(passenger(true)).unwrap();
        assert_eq!(draft.step(), BookingStep::Payment);
        assert_eq!(draft.total(), Price::usd(479));

        let mut rng = StdRng::seed_from_u64(1);
        let booking = draft
            .complete_payment(paypal(), &mut rng, date("2025-08-01"))
            .unwrap();
        assert_eq!(draft.step(), BookingStep::Confirmation);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.total, Price::usd(479));
        assert_eq!(booking.seat, seat("1A"));
        assert_eq!(draft.booking(), Some(&booking));
        assert_eq!(booking.reference.as_str().len(), BookingReference::LENGTH);
    }

    #[test]
    fn test_business_seat_without_baggage() {
        let mut draft = draft();
        draft.choose_seat(seat("10C")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        assert_eq!(draft.total(), Price::usd(349));
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let mut draft = draft();
        assert_eq!(
            draft.submit_passenger(passenger(false)),
            Err(BookingError::WrongStep {
                expected: BookingStep::Passenger,
                current: BookingStep::Seat,
            })
        );
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            draft.complete_payment(paypal(), &mut rng, date("2025-08-01")),
            Err(BookingError::WrongStep { .. })
        ));

        draft.choose_seat(seat("20A")).unwrap();
        assert!(matches!(
            draft.choose_seat(seat("1A")),
            Err(BookingError::WrongStep { .. })
        ));
    }

    #[test]
    fn test_seat_errors_keep_step() {
        let mut draft = draft();
        assert_eq!(
            draft.choose_seat(seat("20B")),
            Err(BookingError::Seat(SeatError::Occupied(seat("20B"))))
        );
        assert_eq!(
            draft.choose_seat(seat("30F")),
            Err(BookingError::Seat(SeatError::Unknown(seat("30F"))))
        );
        assert_eq!(draft.step(), BookingStep::Seat);
        assert!(draft.seat().is_none());
    }

    #[test]
    fn test_back_keeps_entries() {
        let mut draft = draft();
        assert_eq!(draft.back(), BookingStep::Seat);

        draft.choose_seat(seat("20A")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        assert_eq!(draft.back(), BookingStep::Passenger);
        assert!(draft.passenger().is_some());
        assert_eq!(draft.back(), BookingStep::Seat);
        assert_eq!(draft.seat().map(|s| s.id), Some(seat("20A")));

        draft.choose_seat(seat("1A")).unwrap();
        assert_eq!(draft.seat().map(|s| s.id), Some(seat("1A")));
    }

    #[test]
    fn test_confirmation_has_no_back() {
        let mut draft = draft();
        draft.choose_seat(seat("20A")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        draft
            .complete_payment(paypal(), &mut StdRng::seed_from_u64(3), date("2025-08-01"))
            .unwrap();
        assert_eq!(draft.back(), BookingStep::Confirmation);
    }

    #[test]
    fn test_record_and_ticket() {
        let mut draft = draft();
        draft.choose_seat(seat("20A")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        let booking = draft
            .complete_payment(paypal(), &mut StdRng::seed_from_u64(3), date("2025-08-01"))
            .unwrap();
        let record = booking.record();
        assert_eq!(record.date_label(), "Aug 15, 2025");
        assert_eq!(record.origin_city, "New York");

        let ticket = record.e_ticket();
        assert!(ticket.contains(booking.reference.as_str()));
        assert!(ticket.contains("Passenger:         Arjun Mehta"));
        assert!(ticket.contains("Seat:              20A"));
        assert!(ticket.contains("Total paid:        $299"));
    }

    #[test]
    fn test_overnight_arrival_date() {
        let flight = flight(0, "DEL", "LHR", 0, (21, 40), 300, 0, 500);
        let mut draft = BookingDraft::with_seat_map(flight, date("2025-08-15"), map());
        draft.choose_seat(seat("20A")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        let booking = draft
            .complete_payment(paypal(), &mut StdRng::seed_from_u64(3), date("2025-08-01"))
            .unwrap();
        assert_eq!(booking.arrival_date(), date("2025-08-16"));
    }

    #[test]
    fn test_demo_bookings_partition() {
        let today = date("2026-10-19");
        let records = demo_bookings(today);
        assert_eq!(records.len(), 4);

        let (upcoming, past) = partition(&records, today);
        let upcoming_refs: Vec<_> = upcoming.iter().map(|r| r.reference.as_str()).collect();
        let past_refs: Vec<_> = past.iter().map(|r| r.reference.as_str()).collect();
        assert_eq!(upcoming_refs, ["ABC123", "DEF456"]);
        assert_eq!(past_refs, ["GHI789", "JKL012"]);
        assert!(past.iter().all(|r| r.status == BookingStatus::Completed));
        assert_eq!(upcoming[0].origin_city, "Delhi");
    }

    #[test]
    fn test_partition_today_is_upcoming() {
        let today = date("2025-08-15");
        let mut draft = draft();
        draft.choose_seat(seat("20A")).unwrap();
        draft.submit_passenger(passenger(false)).unwrap();
        let record = draft
            .complete_payment(paypal(), &mut StdRng::seed_from_u64(3), today)
            .unwrap()
            .record();

        let (upcoming, past) = partition(std::slice::from_ref(&record), today);
        assert_eq!(upcoming.len(), 1);
        assert!(past.is_empty());

        let tomorrow = date("2025-08-16");
        let (upcoming, past) = partition(&[record], tomorrow);
        assert!(upcoming.is_empty());
        assert_eq!(past[0].status, BookingStatus::Completed);
    }
}
