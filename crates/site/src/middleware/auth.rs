//! Authentication extractors.
//!
//! Logging in is a demo: any email with a non-empty password works. What
//! these extractors guard is the presence of a session identity.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use wanderlust_core::user::UserInfo;

use crate::models::{Toast, session};

/// Extractor that requires a logged-in visitor.
///
/// Anonymous visitors are sent to `/login` with a toast explaining why.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Welcome back, {}!", user.name)
/// }
/// ```
pub struct RequireUser(pub UserInfo);

/// Error returned when a page needs a logged-in visitor.
pub enum AuthRejection {
    /// Redirect to the login page.
    RedirectToLogin,
    /// No session layer is installed; a wiring bug.
    NoSession,
    /// The session store failed to load the identity.
    SessionStore,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::NoSession | Self::SessionStore => {
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Toast explaining the redirect, worded for the page that was refused.
fn login_required_toast(path: &str) -> Toast {
    if path.starts_with("/profile") {
        Toast::error("Authentication Required", "Please log in to view your profile")
    } else {
        Toast::error("Login Required", "Please log in to access your dashboard.")
    }
}

/// Load the session identity, failing the request if the store errors.
async fn load_user(session: &Session) -> Result<Option<UserInfo>, AuthRejection> {
    session::current_user(session).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to load session user");
        AuthRejection::SessionStore
    })
}

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::NoSession)?;

        if let Some(user) = load_user(session).await? {
            return Ok(Self(user));
        }

        tracing::debug!(path = %parts.uri.path(), "Anonymous visitor sent to login");
        if let Err(e) = login_required_toast(parts.uri.path()).push(session).await {
            tracing::warn!(error = %e, "Failed to queue login toast");
        }
        Err(AuthRejection::RedirectToLogin)
    }
}

/// Extractor that optionally gets the logged-in visitor.
///
/// Unlike `RequireUser`, anonymous visitors are not turned away; only a
/// failing session store rejects the request.
pub struct OptionalUser(pub Option<UserInfo>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => load_user(session).await?,
            None => None,
        };

        Ok(Self(user))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::Request;
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::session::keys;

    fn parts_with(session: Session) -> Parts {
        let (parts, ()) = Request::builder()
            .uri("/dashboard")
            .extension(session)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    /// A session whose stored identity no longer deserializes.
    async fn corrupt_session() -> Session {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        session.insert(keys::CURRENT_USER, 42_u8).await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_require_user_fails_on_unreadable_identity() {
        let mut parts = parts_with(corrupt_session().await);
        let rejection = RequireUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(rejection, Err(AuthRejection::SessionStore)));
    }

    #[tokio::test]
    async fn test_optional_user_fails_on_unreadable_identity() {
        let mut parts = parts_with(corrupt_session().await);
        let rejection = OptionalUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(rejection, Err(AuthRejection::SessionStore)));
    }

    #[tokio::test]
    async fn test_anonymous_visitor_is_redirected() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);
        let mut parts = parts_with(session);
        let rejection = RequireUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(rejection, Err(AuthRejection::RedirectToLogin)));

        let Ok(OptionalUser(user)) = OptionalUser::from_request_parts(&mut parts, &()).await else {
            panic!("anonymous visitor should be accepted");
        };
        assert!(user.is_none());
    }

    #[test]
    fn test_toast_matches_page() {
        assert_eq!(login_required_toast("/dashboard").title, "Login Required");
        assert_eq!(
            login_required_toast("/profile").description,
            "Please log in to view your profile"
        );
        assert!(login_required_toast("/dashboard/bookings/ABC123/ticket").destructive);
    }
}
