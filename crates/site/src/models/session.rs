//! Session-related types.
//!
//! Typed accessors over the raw session keys. Values are serde JSON and
//! carry no version; a session from an older build is simply discarded.

use tower_sessions::Session;
use wanderlust_core::booking::{BookingDraft, BookingRecord};
use wanderlust_core::passenger::PassengerInput;
use wanderlust_core::search::SearchCriteria;
use wanderlust_core::user::UserInfo;

/// Session keys for per-visitor data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the last accepted search.
    pub const SEARCH: &str = "search";

    /// Key for the booking wizard in progress.
    pub const BOOKING_DRAFT: &str = "booking_draft";

    /// Key for the visitor's bookings, newest last.
    pub const BOOKINGS: &str = "bookings";

    /// Key for passenger details the visitor asked us to remember.
    pub const SAVED_PASSENGER: &str = "saved_passenger";

    /// Key for toasts not yet shown.
    pub const TOASTS: &str = "toasts";
}

type SessionResult<T> = Result<T, tower_sessions::session::Error>;

/// The logged-in user, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current_user(session: &Session) -> SessionResult<Option<UserInfo>> {
    session.get(keys::CURRENT_USER).await
}

/// Log a user in, or save their edited profile.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(session: &Session, user: &UserInfo) -> SessionResult<()> {
    session.insert(keys::CURRENT_USER, user).await
}

/// Log the user out. Searches and bookings stay with the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> SessionResult<()> {
    session.remove::<UserInfo>(keys::CURRENT_USER).await?;
    Ok(())
}

/// The last accepted search.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn search(session: &Session) -> SessionResult<Option<SearchCriteria>> {
    session.get(keys::SEARCH).await
}

/// Remember an accepted search.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_search(session: &Session, criteria: &SearchCriteria) -> SessionResult<()> {
    session.insert(keys::SEARCH, criteria).await
}

/// The booking in progress.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn booking_draft(session: &Session) -> SessionResult<Option<BookingDraft>> {
    session.get(keys::BOOKING_DRAFT).await
}

/// Store the booking in progress, replacing any earlier one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_booking_draft(session: &Session, draft: &BookingDraft) -> SessionResult<()> {
    session.insert(keys::BOOKING_DRAFT, draft).await
}

/// All bookings made in this session, plus any demo history.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn bookings(session: &Session) -> SessionResult<Vec<BookingRecord>> {
    Ok(session.get(keys::BOOKINGS).await?.unwrap_or_default())
}

/// Append bookings to the visitor's list, skipping references already there.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn add_bookings(
    session: &Session,
    new: impl IntoIterator<Item = BookingRecord>,
) -> SessionResult<()> {
    let mut all = bookings(session).await?;
    for record in new {
        if !all.iter().any(|r| r.reference == record.reference) {
            all.push(record);
        }
    }
    session.insert(keys::BOOKINGS, all).await
}

/// Passenger form values saved from an earlier booking.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn saved_passenger(session: &Session) -> SessionResult<Option<PassengerInput>> {
    session.get(keys::SAVED_PASSENGER).await
}

/// Remember passenger form values for the next booking.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_saved_passenger(session: &Session, input: &PassengerInput) -> SessionResult<()> {
    session.insert(keys::SAVED_PASSENGER, input).await
}
