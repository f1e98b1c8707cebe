//! The booking wizard: seat, passenger, payment, confirmation.
//!
//! The draft lives in the session. Every post either advances it one step
//! and redirects back to `GET /booking`, or re-renders the current step
//! with inline errors.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::booking::{BAGGAGE_FEE, Booking, BookingDraft, BookingError, BookingStep};
use wanderlust_core::flight::Flight;
use wanderlust_core::passenger::{MealPreference, PassengerInput, Title};
use wanderlust_core::payment::{PaymentInput, PaymentMethod};
use wanderlust_core::seats::SeatError;
use wanderlust_core::validation::ValidationErrors;
use wanderlust_core::{CabinClass, Price, SeatId};

use super::forms::{Choice, long_date};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::{Page, Toast, session};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Seat form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeatForm {
    pub seat: String,
}

/// Passenger form data. Checkboxes are absent when unticked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PassengerForm {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub passport_number: String,
    pub save_info: Option<String>,
    pub add_baggage: Option<String>,
    pub meal_preference: String,
}

impl From<PassengerForm> for PassengerInput {
    fn from(form: PassengerForm) -> Self {
        Self {
            title: form.title,
            first_name: form.first_name,
            last_name: form.last_name,
            date_of_birth: form.date_of_birth,
            email: form.email,
            phone: form.phone,
            nationality: form.nationality,
            passport_number: form.passport_number,
            save_info: form.save_info.is_some(),
            add_baggage: form.add_baggage.is_some(),
            meal_preference: form.meal_preference,
        }
    }
}

/// Payment form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub method: String,
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

impl From<PaymentForm> for PaymentInput {
    fn from(form: PaymentForm) -> Self {
        Self {
            method: PaymentMethod::parse(&form.method),
            cardholder_name: form.cardholder_name,
            card_number: form.card_number,
            expiry: form.expiry,
            cvv: form.cvv,
        }
    }
}

// =============================================================================
// Views
// =============================================================================

/// One step in the progress header.
#[derive(Debug, Clone)]
pub struct StepView {
    pub number: u8,
    pub title: &'static str,
    pub done: bool,
    pub current: bool,
}

/// One seat button.
#[derive(Debug, Clone)]
pub struct SeatView {
    pub id: String,
    pub occupied: bool,
    pub selected: bool,
    /// Draw the aisle gap before this seat.
    pub aisle_before: bool,
}

/// One row of seats.
#[derive(Debug, Clone)]
pub struct RowView {
    pub number: u8,
    pub seats: Vec<SeatView>,
}

/// One cabin section of the seat map.
#[derive(Debug, Clone)]
pub struct CabinView {
    pub label: &'static str,
    pub class: &'static str,
    pub surcharge: String,
    pub available: usize,
    pub rows: Vec<RowView>,
}

/// Aisle runs between columns C and D in every cabin.
const AISLE_BEFORE: char = 'D';

fn cabin_views(draft: &BookingDraft) -> Vec<CabinView> {
    let chosen = draft.seat().map(|s| s.id);
    CabinClass::ALL
        .iter()
        .map(|&cabin| CabinView {
            label: cabin.label(),
            class: cabin.as_str(),
            surcharge: if cabin.surcharge().is_zero() {
                "Included".to_owned()
            } else {
                format!("+${}", cabin.surcharge())
            },
            available: draft.seat_map().available_in(cabin),
            rows: draft
                .seat_map()
                .rows_in(cabin)
                .into_iter()
                .map(|row| RowView {
                    number: row.first().map_or(0, |s| s.id.row()),
                    seats: row
                        .iter()
                        .map(|seat| SeatView {
                            id: seat.id.to_string(),
                            occupied: seat.occupied,
                            selected: chosen == Some(seat.id),
                            aisle_before: seat.id.column() == AISLE_BEFORE,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Passenger form state.
#[derive(Debug, Clone)]
pub struct PassengerFormView {
    pub input: PassengerInput,
    pub errors: ValidationErrors,
    pub titles: Vec<Choice>,
    pub meals: Vec<Choice>,
    pub baggage_fee: Decimal,
}

impl PassengerFormView {
    #[must_use]
    pub fn new(input: PassengerInput, errors: ValidationErrors) -> Self {
        let meal = MealPreference::parse(&input.meal_preference);
        Self {
            titles: Title::ALL
                .iter()
                .map(|t| Choice::new(t.as_str(), t.as_str(), t.as_str() == input.title.trim()))
                .collect(),
            meals: MealPreference::ALL
                .iter()
                .map(|m| Choice::new(m.as_str(), m.label(), *m == meal))
                .collect(),
            baggage_fee: BAGGAGE_FEE,
            input,
            errors,
        }
    }
}

/// Payment form state. Card number and CVV are never echoed back.
#[derive(Debug, Clone)]
pub struct PaymentFormView {
    pub methods: Vec<Choice>,
    pub cardholder_name: String,
    pub expiry: String,
    pub errors: ValidationErrors,
}

impl PaymentFormView {
    #[must_use]
    pub fn new(input: &PaymentInput, errors: ValidationErrors) -> Self {
        Self {
            methods: PaymentMethod::ALL
                .iter()
                .map(|m| Choice::new(m.as_str(), m.label(), *m == input.method))
                .collect(),
            cardholder_name: input.cardholder_name.clone(),
            expiry: input.expiry.clone(),
            errors,
        }
    }
}

/// Booking page template.
#[derive(Template, WebTemplate)]
#[template(path = "booking/show.html")]
pub struct BookingTemplate {
    pub page: Page,
    /// `seat`, `passenger`, `payment` or `confirmation`.
    pub step: &'static str,
    pub step_title: &'static str,
    pub step_number: u8,
    pub progress: u8,
    pub steps: Vec<StepView>,
    pub flight: Flight,
    pub travel_date: String,
    pub seat: Option<String>,
    pub seat_cabin: Option<&'static str>,
    pub seat_surcharge: Decimal,
    pub baggage_fee: Decimal,
    pub total: Price,
    pub cabins: Vec<CabinView>,
    pub passenger: PassengerFormView,
    pub payment: PaymentFormView,
    pub booking: Option<Booking>,
    pub delay_seconds: u64,
}

const fn step_key(step: BookingStep) -> &'static str {
    match step {
        BookingStep::Seat => "seat",
        BookingStep::Passenger => "passenger",
        BookingStep::Payment => "payment",
        BookingStep::Confirmation => "confirmation",
    }
}

const ALL_STEPS: [BookingStep; 4] = [
    BookingStep::Seat,
    BookingStep::Passenger,
    BookingStep::Payment,
    BookingStep::Confirmation,
];

impl BookingTemplate {
    fn new(
        state: &AppState,
        page: Page,
        draft: &BookingDraft,
        passenger: PassengerFormView,
        payment: PaymentFormView,
    ) -> Self {
        let step = draft.step();
        Self {
            page,
            step: step_key(step),
            step_title: step.title(),
            step_number: step.number(),
            progress: step.progress(),
            steps: ALL_STEPS
                .iter()
                .map(|s| StepView {
                    number: s.number(),
                    title: s.title(),
                    done: s.number() < step.number(),
                    current: *s == step,
                })
                .collect(),
            flight: draft.flight().clone(),
            travel_date: long_date(draft.travel_date()),
            seat: draft.seat().map(|s| s.id.to_string()),
            seat_cabin: draft.seat().map(|s| s.cabin.label()),
            seat_surcharge: draft.seat_surcharge(),
            baggage_fee: draft.baggage_fee(),
            total: draft.total(),
            cabins: cabin_views(draft),
            passenger,
            payment,
            booking: draft.booking().cloned(),
            delay_seconds: state.config().payment_delay.as_secs(),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Send the visitor to search when there is nothing to book.
async fn no_draft(session: &Session) -> Result<Response> {
    Toast::error(
        "No flight selected",
        "Please search for a flight and choose one to book.",
    )
    .push(session)
    .await?;
    Ok(Redirect::to("/search").into_response())
}

/// Form values to show when a step is first rendered.
async fn initial_passenger(session: &Session, draft: &BookingDraft) -> Result<PassengerInput> {
    if let Some(details) = draft.passenger() {
        return Ok(details.to_input());
    }
    if let Some(saved) = session::saved_passenger(session).await? {
        return Ok(saved);
    }
    Ok(session::current_user(session)
        .await?
        .map(|user| PassengerInput {
            email: user.email.to_string(),
            phone: user.phone.unwrap_or_default(),
            ..PassengerInput::default()
        })
        .unwrap_or_default())
}

fn initial_payment(draft: &BookingDraft) -> PaymentInput {
    PaymentInput {
        cardholder_name: draft
            .passenger()
            .map(|p| p.full_name())
            .unwrap_or_default(),
        ..PaymentInput::default()
    }
}

/// An out-of-order post (a stale tab, the browser back button) just shows
/// the step the draft is really on.
fn wrong_step(error: &BookingError) -> Response {
    tracing::warn!(error = %error, "Booking form posted out of order");
    Redirect::to("/booking").into_response()
}

// =============================================================================
// Routes
// =============================================================================

/// Display the current wizard step.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let Some(draft) = session::booking_draft(&session).await? else {
        return no_draft(&session).await;
    };
    let passenger = initial_passenger(&session, &draft).await?;
    let payment = initial_payment(&draft);
    let page = Page::load(&session).await?;

    Ok(BookingTemplate::new(
        &state,
        page,
        &draft,
        PassengerFormView::new(passenger, ValidationErrors::new()),
        PaymentFormView::new(&payment, ValidationErrors::new()),
    )
    .into_response())
}

/// Handle the seat choice.
#[instrument(skip(session, form), fields(seat = %form.seat))]
pub async fn choose_seat(session: Session, Form(form): Form<SeatForm>) -> Result<Response> {
    let Some(mut draft) = session::booking_draft(&session).await? else {
        return no_draft(&session).await;
    };

    let Ok(id) = SeatId::parse(&form.seat) else {
        Toast::error("No seat selected", "Please select a seat to continue.")
            .push(&session)
            .await?;
        return Ok(Redirect::to("/booking").into_response());
    };

    match draft.choose_seat(id) {
        Ok(seat) => {
            tracing::info!(seat = %seat.id, cabin = seat.cabin.as_str(), "Seat chosen");
            let seat_label = seat.id.to_string();
            add_breadcrumb("booking", "Seat chosen", Some(&[("seat", seat_label.as_str())]));
            session::set_booking_draft(&session, &draft).await?;
            Toast::success(
                "Seats selected",
                format!("You have selected seat: {}", seat.id),
            )
            .push(&session)
            .await?;
        }
        Err(BookingError::Seat(e)) => {
            let description = match e {
                SeatError::Occupied(id) => {
                    format!("Seat {id} is already taken. Please choose another seat.")
                }
                SeatError::Unknown(id) => format!("Seat {id} does not exist on this aircraft."),
            };
            Toast::error("Seat unavailable", description)
                .push(&session)
                .await?;
        }
        Err(e) => return Ok(wrong_step(&e)),
    }
    Ok(Redirect::to("/booking").into_response())
}

/// Handle the passenger details form.
#[instrument(skip(state, session, form))]
pub async fn submit_passenger(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PassengerForm>,
) -> Result<Response> {
    let Some(mut draft) = session::booking_draft(&session).await? else {
        return no_draft(&session).await;
    };
    if draft.step() != BookingStep::Passenger {
        return Ok(wrong_step(&BookingError::WrongStep {
            expected: BookingStep::Passenger,
            current: draft.step(),
        }));
    }

    let input = PassengerInput::from(form);
    let details = match input.validate(Utc::now().date_naive()) {
        Ok(details) => details,
        Err(errors) => {
            tracing::debug!(errors = %errors, "Passenger details rejected");
            let page = Page::load(&session).await?;
            let payment = initial_payment(&draft);
            let template = BookingTemplate::new(
                &state,
                page,
                &draft,
                PassengerFormView::new(input, errors),
                PaymentFormView::new(&payment, ValidationErrors::new()),
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let name = details.full_name();
    if details.save_info {
        session::set_saved_passenger(&session, &input).await?;
    }
    if let Err(e) = draft.submit_passenger(details) {
        return Ok(wrong_step(&e));
    }
    session::set_booking_draft(&session, &draft).await?;
    tracing::info!("Passenger details saved");
    Toast::success(
        "Passenger details saved",
        format!("Passenger information for {name} has been saved."),
    )
    .push(&session)
    .await?;
    Ok(Redirect::to("/booking").into_response())
}

/// Handle the payment form.
///
/// Waits the configured processing delay, then always succeeds: the booking
/// gets its reference and joins the visitor's bookings list.
#[instrument(skip(state, session, form))]
pub async fn pay(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<PaymentForm>,
) -> Result<Response> {
    let Some(mut draft) = session::booking_draft(&session).await? else {
        return no_draft(&session).await;
    };
    if draft.step() != BookingStep::Payment {
        return Ok(wrong_step(&BookingError::WrongStep {
            expected: BookingStep::Payment,
            current: draft.step(),
        }));
    }

    let input = PaymentInput::from(form);
    let details = match input.validate() {
        Ok(details) => details,
        Err(errors) => {
            tracing::debug!(errors = %errors, "Payment details rejected");
            let page = Page::load(&session).await?;
            let passenger = initial_passenger(&session, &draft).await?;
            let template = BookingTemplate::new(
                &state,
                page,
                &draft,
                PassengerFormView::new(passenger, ValidationErrors::new()),
                PaymentFormView::new(&input, errors),
            );
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    tracing::info!(method = details.method.as_str(), "Processing payment");
    tokio::time::sleep(state.config().payment_delay).await;

    let booked_on = Utc::now().date_naive();
    let booking = match draft.complete_payment(details, &mut rand::rng(), booked_on) {
        Ok(booking) => booking,
        Err(e) => return Ok(wrong_step(&e)),
    };

    tracing::info!(
        reference = %booking.reference,
        total = %booking.total,
        "Booking confirmed"
    );
    add_breadcrumb(
        "booking",
        "Booking confirmed",
        Some(&[("reference", booking.reference.as_str())]),
    );
    session::set_booking_draft(&session, &draft).await?;
    session::add_bookings(&session, [booking.record()]).await?;
    Toast::success(
        "Payment successful!",
        format!(
            "Your booking has been confirmed. Booking reference: {}",
            booking.reference
        ),
    )
    .push(&session)
    .await?;
    Ok(Redirect::to("/booking").into_response())
}

/// Go back one step, keeping everything entered so far.
#[instrument(skip(session))]
pub async fn back(session: Session) -> Result<Response> {
    let Some(mut draft) = session::booking_draft(&session).await? else {
        return no_draft(&session).await;
    };
    let step = draft.back();
    tracing::debug!(step = %step, "Booking stepped back");
    session::set_booking_draft(&session, &draft).await?;
    Ok(Redirect::to("/booking").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use wanderlust_core::catalog::Airline;
    use wanderlust_core::flight::{Endpoint, FlightId};
    use wanderlust_core::seats::{Seat, SeatMap};
    use wanderlust_core::{AirportCode, CabinClass};

    use super::*;

    fn flight() -> Flight {
        let endpoint = |code: &str, city: &str, (h, m)| Endpoint {
            airport: AirportCode::parse(code).unwrap(),
            city: city.to_owned(),
            time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        };
        Flight {
            id: FlightId::new("flight-DEL-BOM-0"),
            airline: Airline::by_name("IndiGo").unwrap(),
            flight_number: "IN 4821".to_owned(),
            departure: endpoint("DEL", "Delhi", (8, 30)),
            arrival: endpoint("BOM", "Mumbai", (10, 45)),
            duration_minutes: 135,
            stops: 0,
            price: Price::usd(240),
            aircraft: "Airbus A320".to_owned(),
            amenities: Vec::new(),
            seats_available: 12,
        }
    }

    fn draft() -> BookingDraft {
        let seat = |id: &str, occupied| {
            let id = SeatId::parse(id).unwrap();
            Seat {
                id,
                cabin: CabinClass::for_row(id.row()),
                occupied,
            }
        };
        let map = SeatMap::from_seats(vec![
            seat("1A", true),
            seat("1D", false),
            seat("20A", false),
            seat("20C", false),
            seat("20D", true),
        ]);
        BookingDraft::with_seat_map(flight(), NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(), map)
    }

    #[test]
    fn test_cabin_views() {
        let mut draft = draft();
        draft.choose_seat(SeatId::parse("20C").unwrap()).unwrap();
        let cabins = cabin_views(&draft);

        let labels: Vec<_> = cabins.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["First Class", "Business", "Economy"]);

        let first = cabins.first().unwrap();
        assert_eq!(first.surcharge, "+$150");
        assert_eq!(first.available, 1);
        assert!(first.rows.first().unwrap().seats.get(1).unwrap().aisle_before);

        let business = cabins.get(1).unwrap();
        assert!(business.rows.is_empty());

        let economy = cabins.get(2).unwrap();
        assert_eq!(economy.surcharge, "Included");
        let row = economy.rows.first().unwrap();
        assert_eq!(row.number, 20);
        let ids: Vec<_> = row.seats.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["20A", "20C", "20D"]);
        assert!(row.seats.get(1).unwrap().selected);
        assert!(row.seats.get(2).unwrap().occupied);
    }

    #[test]
    fn test_passenger_form_checkboxes() {
        let form = PassengerForm {
            title: "Dr".to_owned(),
            add_baggage: Some("on".to_owned()),
            ..PassengerForm::default()
        };
        let input = PassengerInput::from(form);
        assert!(input.add_baggage);
        assert!(!input.save_info);

        let view = PassengerFormView::new(input, ValidationErrors::new());
        let selected: Vec<_> = view.titles.iter().filter(|c| c.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.first().unwrap().value, "Dr");
        assert!(view.meals.first().unwrap().selected);
    }

    #[test]
    fn test_payment_form_parses_method() {
        let form = PaymentForm {
            method: "google_pay".to_owned(),
            ..PaymentForm::default()
        };
        let input = PaymentInput::from(form);
        assert_eq!(input.method, PaymentMethod::GooglePay);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_step_keys() {
        let keys: Vec<_> = ALL_STEPS.iter().map(|s| step_key(*s)).collect();
        assert_eq!(keys, vec!["seat", "passenger", "payment", "confirmation"]);
    }

    #[test]
    fn test_initial_payment_starts_blank_without_passenger() {
        let draft = draft();
        let payment = initial_payment(&draft);
        assert_eq!(payment.cardholder_name, "");
        assert_eq!(payment.method, PaymentMethod::CreditCard);
    }
}
