//! Authentication route handlers.
//!
//! Login and registration are demos: any well-formed email with a password
//! gets a session identity. Nothing is stored beyond the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wanderlust_core::booking::demo_bookings;
use wanderlust_core::user::{LoginInput, RegistrationInput, UserInfo};
use wanderlust_core::validation::ValidationErrors;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::OptionalUser;
use crate::models::{Page, Toast, session};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data. The terms checkbox is absent when unticked.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: Option<String>,
}

impl From<RegisterForm> for RegistrationInput {
    fn from(form: RegisterForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
            accept_terms: form.accept_terms.is_some(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: Page,
}

/// Register page template. Passwords are never echoed back.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub page: Page,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub accept_terms: bool,
    pub errors: ValidationErrors,
}

impl RegisterTemplate {
    fn blank(page: Page) -> Self {
        Self {
            page,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            accept_terms: false,
            errors: ValidationErrors::new(),
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Put `user` in the session and greet them on the dashboard.
async fn sign_in(state: &AppState, session: &Session, user: &UserInfo, toast: Toast) -> Result<()> {
    session.cycle_id().await?;
    session::set_current_user(session, user).await?;
    set_sentry_user(user.email.as_str());
    add_breadcrumb("auth", "Signed in", None);

    if state.config().demo_bookings {
        session::add_bookings(session, demo_bookings(Utc::now().date_naive())).await?;
    }
    toast.push(session).await?;
    Ok(())
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
#[instrument(skip(user, session))]
pub async fn login_page(OptionalUser(user): OptionalUser, session: Session) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(LoginTemplate {
        page: Page::load(&session).await?,
    }
    .into_response())
}

/// Handle the login form.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let input = LoginInput {
        email: form.email,
        password: form.password,
    };
    let user = match input.authenticate() {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(reason = e.description(), "Login rejected");
            Toast::error(e.to_string(), e.description())
                .push(&session)
                .await?;
            return Ok(Redirect::to("/login").into_response());
        }
    };

    tracing::info!("User logged in");
    let welcome = Toast::success("Login Successful", format!("Welcome back, {}!", user.name));
    sign_in(&state, &session, &user, welcome).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

/// Display the registration page.
#[instrument(skip(user, session))]
pub async fn register_page(OptionalUser(user): OptionalUser, session: Session) -> Result<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    Ok(RegisterTemplate::blank(Page::load(&session).await?).into_response())
}

/// Handle the registration form.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let input = RegistrationInput::from(form);
    let user = match input.validate() {
        Ok(user) => user,
        Err(errors) => {
            tracing::debug!(errors = %errors, "Registration rejected");
            let template = RegisterTemplate {
                page: Page::load(&session).await?,
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                accept_terms: input.accept_terms,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    tracing::info!("User registered");
    let welcome = Toast::success(
        "Registration Successful",
        "Welcome to WanderlustWings! You can now book flights and manage your trips.",
    );
    sign_in(&state, &session, &user, welcome).await?;
    Ok(Redirect::to("/dashboard").into_response())
}

/// Handle logout. Bookings and searches stay with the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    session::clear_current_user(&session).await?;
    clear_sentry_user();
    tracing::info!("User logged out");
    Toast::success(
        "Logged Out Successfully",
        "You have been logged out of your account.",
    )
    .push(&session)
    .await?;
    Ok(Redirect::to("/").into_response())
}
