//! Home page and featured destination quick search.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{Days, Utc};
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::AirportCode;
use wanderlust_core::catalog::airport_by_code;
use wanderlust_core::search::SearchCriteria;

use super::search::SearchFormView;
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Page, session};

// =============================================================================
// Static Content
// =============================================================================

/// Quick searches from a destination card depart from Mumbai.
pub const QUICK_SEARCH_ORIGIN: &str = "BOM";

/// ...a week from today.
pub const QUICK_SEARCH_DAYS_AHEAD: u64 = 7;

/// A destination card on the home page.
#[derive(Debug, Clone, Copy)]
pub struct Destination {
    pub name: &'static str,
    pub code: &'static str,
    pub country: &'static str,
    pub image: &'static str,
    /// Advertised "from" fare in dollars.
    pub price: u32,
}

pub const FEATURED_DESTINATIONS: [Destination; 4] = [
    Destination {
        name: "Paris",
        code: "CDG",
        country: "France",
        image: "https://images.unsplash.com/photo-1499856871958-5b9088d4decd?q=80&w=800",
        price: 299,
    },
    Destination {
        name: "Tokyo",
        code: "HND",
        country: "Japan",
        image: "https://images.unsplash.com/photo-1536098561742-ca998e48cbcc?q=80&w=800",
        price: 799,
    },
    Destination {
        name: "New York",
        code: "JFK",
        country: "USA",
        image: "https://images.unsplash.com/photo-1546436836-07a91091f160?q=80&w=800",
        price: 349,
    },
    Destination {
        name: "Sydney",
        code: "SYD",
        country: "Australia",
        image: "https://images.unsplash.com/photo-1506973035872-a4ec16b8e8d9?q=80&w=800",
        price: 899,
    },
];

/// A customer quote.
#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub location: &'static str,
    pub comment: &'static str,
    /// Out of five.
    pub rating: u8,
}

impl Testimonial {
    #[must_use]
    pub fn initial(&self) -> char {
        self.name.chars().next().unwrap_or('?')
    }

    /// `"★★★★☆"`.
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        "★".repeat(filled) + &"☆".repeat(5 - filled)
    }
}

pub const TESTIMONIALS: [Testimonial; 3] = [
    Testimonial {
        name: "Sarah Johnson",
        location: "New York, USA",
        comment: "WanderlustWings made booking my family vacation so easy. The UI is clean and the flight selection was excellent. Will definitely use again!",
        rating: 5,
    },
    Testimonial {
        name: "Raj Patel",
        location: "London, UK",
        comment: "I was able to book my business trip in minutes. The seat selection feature is stellar and the prices were better than competitors.",
        rating: 5,
    },
    Testimonial {
        name: "Maria Gonzalez",
        location: "Barcelona, Spain",
        comment: "As a frequent traveler, I appreciate how simple WanderlustWings makes the booking process. The flight change options are also very convenient.",
        rating: 4,
    },
];

// =============================================================================
// Routes
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub form: SearchFormView,
    pub destinations: &'static [Destination],
    pub testimonials: &'static [Testimonial],
}

/// Display the home page.
#[instrument(skip(session))]
pub async fn home(session: Session) -> Result<impl IntoResponse> {
    let criteria = session::search(&session).await?.unwrap_or_default();
    Ok(HomeTemplate {
        page: Page::load(&session).await?,
        form: SearchFormView::new(&criteria, Utc::now().date_naive(), "/"),
        destinations: &FEATURED_DESTINATIONS,
        testimonials: &TESTIMONIALS,
    })
}

/// Search from Mumbai to a featured destination, departing in a week.
///
/// Any well-formed code is accepted. Tokyo is advertised but no flights
/// serve it, so its card leads to an empty result list.
#[instrument(skip(session))]
pub async fn destination(session: Session, Path(code): Path<String>) -> Result<Response> {
    let destination = AirportCode::parse(&code)
        .map_err(|_| AppError::NotFound(format!("destination {code}")))?;
    if airport_by_code(destination).is_none() {
        tracing::debug!(%destination, "Quick search to an airport outside the catalog");
    }

    let criteria = SearchCriteria {
        origin: AirportCode::parse(QUICK_SEARCH_ORIGIN).ok(),
        destination: Some(destination),
        depart_date: Utc::now()
            .date_naive()
            .checked_add_days(Days::new(QUICK_SEARCH_DAYS_AHEAD)),
        ..SearchCriteria::default()
    };
    tracing::info!(%destination, "Destination quick search");
    session::set_search(&session, &criteria).await?;
    Ok(Redirect::to("/search/results").into_response())
}
