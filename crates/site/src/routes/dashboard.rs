//! Dashboard: the visitor's upcoming and past trips, and e-ticket download.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::booking::{BookingRecord, partition};
use wanderlust_core::user::UserInfo;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{Page, session};

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub page: Page,
    pub user: UserInfo,
    pub upcoming: Vec<BookingRecord>,
    pub past: Vec<BookingRecord>,
}

/// Display the dashboard.
#[instrument(skip(user, session), fields(email = %user.email))]
pub async fn index(RequireUser(user): RequireUser, session: Session) -> Result<impl IntoResponse> {
    let records = session::bookings(&session).await?;
    let (upcoming, past) = partition(&records, Utc::now().date_naive());
    tracing::debug!(
        upcoming = upcoming.len(),
        past = past.len(),
        "Dashboard loaded"
    );

    Ok(DashboardTemplate {
        page: Page::load(&session).await?,
        user,
        upcoming,
        past,
    })
}

/// Download filename for a ticket.
fn ticket_filename(record: &BookingRecord) -> String {
    format!("wanderlust-{}.txt", record.reference)
}

/// Download the plain-text e-ticket for one of this session's bookings.
///
/// Open to anonymous visitors so the confirmation step can link to it.
#[instrument(skip(session))]
pub async fn ticket(session: Session, Path(reference): Path<String>) -> Result<Response> {
    let record = session::bookings(&session)
        .await?
        .into_iter()
        .find(|r| r.reference.as_str() == reference)
        .ok_or_else(|| AppError::NotFound(format!("booking {reference}")))?;

    tracing::info!(reference = %record.reference, "E-ticket downloaded");
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", ticket_filename(&record)),
            ),
        ],
        record.e_ticket(),
    )
        .into_response())
}
