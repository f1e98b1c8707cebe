//! Profile page: view and edit the session identity.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::user::{ProfileInput, UserInfo};
use wanderlust_core::validation::ValidationErrors;

use crate::error::{Result, set_sentry_user};
use crate::filters;
use crate::middleware::RequireUser;
use crate::models::{Page, Toast, session};

/// Profile page template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/show.html")]
pub struct ProfileTemplate {
    pub page: Page,
    pub user: UserInfo,
    pub form: ProfileInput,
    pub errors: ValidationErrors,
    pub booking_count: usize,
}

/// Display the profile.
#[instrument(skip(user, session), fields(email = %user.email))]
pub async fn show(RequireUser(user): RequireUser, session: Session) -> Result<impl IntoResponse> {
    let booking_count = session::bookings(&session).await?.len();
    Ok(ProfileTemplate {
        page: Page::load(&session).await?,
        form: user.to_profile_input(),
        user,
        errors: ValidationErrors::new(),
        booking_count,
    })
}

/// Save profile changes.
#[instrument(skip(user, session, form), fields(email = %user.email))]
pub async fn update(
    RequireUser(user): RequireUser,
    session: Session,
    Form(form): Form<ProfileInput>,
) -> Result<Response> {
    let mut updated = user.clone();
    if let Err(errors) = form.apply(&mut updated) {
        tracing::debug!(errors = %errors, "Profile update rejected");
        let booking_count = session::bookings(&session).await?.len();
        let template = ProfileTemplate {
            page: Page::load(&session).await?,
            user,
            form,
            errors,
            booking_count,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
    }

    session::set_current_user(&session, &updated).await?;
    set_sentry_user(updated.email.as_str());
    tracing::info!("Profile updated");
    Toast::success(
        "Profile Updated",
        "Your profile information has been updated successfully.",
    )
    .push(&session)
    .await?;
    Ok(Redirect::to("/profile").into_response())
}
