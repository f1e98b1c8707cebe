//! Flight search: the search form, the results page and picking a flight.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, RawQuery, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::booking::BookingDraft;
use wanderlust_core::catalog::AIRPORTS;
use wanderlust_core::flight::{Flight, FlightId};
use wanderlust_core::search::{
    self, DayPeriod, FlightFilters, MAX_PASSENGERS, PriceRange, SearchCriteria, SortKey,
    StopBucket, TravelClass,
};
use wanderlust_core::{AirportCode, TripType};

use super::forms::{Choice, date_value, long_date, parse_date, query_pairs};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{Page, Toast, session};
use crate::state::AppState;

// =============================================================================
// Search Form
// =============================================================================

/// Search form data, as posted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub trip_type: String,
    pub origin: String,
    pub destination: String,
    pub depart_date: String,
    pub return_date: String,
    pub passengers: String,
    pub travel_class: String,
    /// Page the form was posted from, so errors land back there.
    pub return_to: String,
}

impl SearchForm {
    /// Criteria as typed. Unknown airports and unreadable dates count as missing.
    #[must_use]
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            trip_type: TripType::parse(&self.trip_type),
            origin: AirportCode::parse(&self.origin).ok(),
            destination: AirportCode::parse(&self.destination).ok(),
            depart_date: parse_date(&self.depart_date),
            return_date: parse_date(&self.return_date),
            passengers: self.passengers.trim().parse().unwrap_or(1),
            travel_class: TravelClass::parse(&self.travel_class),
        }
    }

    fn form_page(&self) -> &'static str {
        if self.return_to == "/" { "/" } else { "/search" }
    }
}

/// The search form's prefilled state.
#[derive(Debug, Clone)]
pub struct SearchFormView {
    pub trip_types: Vec<Choice>,
    pub origins: Vec<Choice>,
    pub destinations: Vec<Choice>,
    pub depart_date: String,
    pub return_date: String,
    pub passengers: Vec<Choice>,
    pub travel_classes: Vec<Choice>,
    /// Earliest selectable date.
    pub today: String,
    pub return_to: &'static str,
}

impl SearchFormView {
    #[must_use]
    pub fn new(criteria: &SearchCriteria, today: NaiveDate, return_to: &'static str) -> Self {
        let airports = |selected: Option<AirportCode>| {
            AIRPORTS
                .iter()
                .map(|a| {
                    Choice::new(
                        a.code.as_str(),
                        format!("{} ({})", a.city, a.code),
                        selected == Some(a.code),
                    )
                })
                .collect()
        };
        Self {
            trip_types: TripType::ALL
                .iter()
                .map(|t| Choice::new(t.as_str(), t.label(), *t == criteria.trip_type))
                .collect(),
            origins: airports(criteria.origin),
            destinations: airports(criteria.destination),
            depart_date: date_value(criteria.depart_date),
            return_date: date_value(criteria.return_date),
            passengers: (1..=MAX_PASSENGERS)
                .map(|n| {
                    let label = if n == 1 { "1 Passenger".to_owned() } else { format!("{n} Passengers") };
                    Choice::new(n.to_string(), label, n == criteria.passengers)
                })
                .collect(),
            travel_classes: TravelClass::ALL
                .iter()
                .map(|c| Choice::new(c.label(), c.label(), *c == criteria.travel_class))
                .collect(),
            today: date_value(Some(today)),
            return_to,
        }
    }
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "search/form.html")]
pub struct SearchTemplate {
    pub page: Page,
    pub form: SearchFormView,
}

/// Display the search form, prefilled with the last search.
#[instrument(skip(session))]
pub async fn search_page(session: Session) -> Result<impl IntoResponse> {
    let criteria = session::search(&session).await?.unwrap_or_default();
    Ok(SearchTemplate {
        page: Page::load(&session).await?,
        form: SearchFormView::new(&criteria, Utc::now().date_naive(), "/search"),
    })
}

/// Handle search form submission.
///
/// A rejected search goes back to the form it came from with a destructive
/// toast naming the first missing field.
#[instrument(skip(session, form), fields(origin = %form.origin, destination = %form.destination))]
pub async fn search(session: Session, Form(form): Form<SearchForm>) -> Result<Response> {
    match form.criteria().validate() {
        Ok(criteria) => {
            tracing::info!(route = %criteria.route_label(), "Search accepted");
            add_breadcrumb("search", &criteria.route_label(), None);
            session::set_search(&session, &criteria).await?;
            Ok(Redirect::to("/search/results").into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Search rejected");
            Toast::error(e.to_string(), e.description())
                .push(&session)
                .await?;
            Ok(Redirect::to(form.form_page()).into_response())
        }
    }
}

// =============================================================================
// Results
// =============================================================================

/// Filter and sort state carried in the results page query string.
///
/// `airline`, `stops` and `time` may repeat. `reset` drops everything else
/// and widens the price range to exactly the fares on offer.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResultsQuery {
    pub sort: SortKey,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub airlines: Vec<String>,
    pub stops: Vec<StopBucket>,
    pub times: Vec<DayPeriod>,
    pub reset: bool,
}

impl ResultsQuery {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in query_pairs(raw.unwrap_or_default()) {
            match key.as_str() {
                "sort" => query.sort = SortKey::parse(&value),
                "min_price" => query.min_price = value.trim().parse().ok(),
                "max_price" => query.max_price = value.trim().parse().ok(),
                "airline" if !value.is_empty() => query.airlines.push(value),
                "stops" => query.stops.extend(StopBucket::parse(&value)),
                "time" => query.times.extend(DayPeriod::parse(&value)),
                "reset" => query.reset = true,
                _ => {}
            }
        }
        query
    }

    /// Filters to apply to the flights on the route.
    #[must_use]
    pub fn filters(&self, route: &[&Flight]) -> FlightFilters {
        if self.reset {
            return FlightFilters::reset(route);
        }
        let initial = PriceRange::initial(route);
        FlightFilters {
            price: PriceRange {
                min: self.min_price.unwrap_or(initial.min),
                max: self.max_price.unwrap_or(initial.max),
            },
            airlines: self.airlines.clone(),
            stops: self.stops.clone(),
            departure_periods: self.times.clone(),
        }
    }

    const fn sort_key(&self) -> SortKey {
        if self.reset { SortKey::Price } else { self.sort }
    }
}

/// Results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search/results.html")]
pub struct ResultsTemplate {
    pub page: Page,
    pub route_label: String,
    pub depart_label: Option<String>,
    pub return_label: Option<String>,
    pub passengers: u8,
    pub travel_class: &'static str,
    pub flights: Vec<Flight>,
    pub route_total: usize,
    pub price: PriceRange,
    /// Slider bounds: the widest range the fares allow.
    pub price_bounds: PriceRange,
    pub airlines: Vec<Choice>,
    pub stops: Vec<Choice>,
    pub times: Vec<Choice>,
    pub sorts: Vec<Choice>,
}

/// Display flights on the searched route, filtered and sorted.
#[instrument(skip(state, session))]
pub async fn results(
    State(state): State<AppState>,
    session: Session,
    RawQuery(raw): RawQuery,
) -> Result<impl IntoResponse> {
    let criteria = session::search(&session).await?.unwrap_or_default();
    let query = ResultsQuery::parse(raw.as_deref());

    let route = search::route_flights(state.catalog(), criteria.origin, criteria.destination);
    let filters = query.filters(&route);
    let sort = query.sort_key();
    let flights: Vec<Flight> = search::apply(&route, &filters, sort)
        .into_iter()
        .cloned()
        .collect();
    tracing::debug!(
        route = %criteria.route_label(),
        on_route = route.len(),
        shown = flights.len(),
        sort = sort.as_str(),
        "Results filtered"
    );

    let airlines = search::available_airlines(state.catalog())
        .into_iter()
        .map(|name| {
            let selected = filters.airlines.contains(&name);
            Choice::new(name.clone(), name, selected)
        })
        .collect();
    let stops = StopBucket::ALL
        .iter()
        .map(|b| Choice::new(b.as_str(), b.label(), filters.stops.contains(b)))
        .collect();
    let times = DayPeriod::ALL
        .iter()
        .map(|p| Choice::new(p.as_str(), p.label(), filters.departure_periods.contains(p)))
        .collect();
    let sorts = SortKey::ALL
        .iter()
        .map(|k| Choice::new(k.as_str(), k.label(), *k == sort))
        .collect();

    let bounds = PriceRange::initial(&route);
    Ok(ResultsTemplate {
        page: Page::load(&session).await?,
        route_label: criteria.route_label(),
        depart_label: criteria.depart_date.map(long_date),
        return_label: criteria.return_date.map(long_date),
        passengers: criteria.passengers,
        travel_class: criteria.travel_class.label(),
        flights,
        route_total: route.len(),
        price: filters.price,
        price_bounds: PriceRange {
            min: 0,
            max: bounds.max.max(filters.price.max),
        },
        airlines,
        stops,
        times,
        sorts,
    })
}

// =============================================================================
// Flight Selection
// =============================================================================

/// Start a booking for the chosen flight.
///
/// The travel date is the searched departure date, or today when the
/// visitor browsed without one. Any booking already in progress is replaced.
#[instrument(skip(state, session))]
pub async fn select(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response> {
    let flight = state
        .catalog()
        .get(&FlightId::new(id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("flight {id}")))?
        .clone();
    let criteria = session::search(&session).await?.unwrap_or_default();
    let travel_date = criteria
        .depart_date
        .unwrap_or_else(|| Utc::now().date_naive());

    tracing::info!(
        flight = %flight.flight_number,
        route = %format!("{}-{}", flight.departure.airport, flight.arrival.airport),
        %travel_date,
        "Flight selected"
    );
    add_breadcrumb("booking", "Flight selected", Some(&[("flight", id.as_str())]));

    let draft = BookingDraft::new(flight, travel_date, &mut rand::rng());
    session::set_booking_draft(&session, &draft).await?;
    Ok(Redirect::to("/booking").into_response())
}
