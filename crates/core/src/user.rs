//! Demo user identity.
//!
//! There are no accounts. Logging in with any email and non-empty password
//! creates a session identity; registering does the same with the supplied
//! name. Passwords are checked for presence and confirmation only, and are
//! never stored.

use serde::{Deserialize, Serialize};

use crate::types::Email;
use crate::validation::ValidationErrors;

/// The visitor's identity as kept in their session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UserInfo {
    /// Identity for a demo login; the name comes from the email's local part.
    #[must_use]
    pub fn from_login(email: Email) -> Self {
        Self {
            name: email.display_name(),
            email,
            phone: None,
            address: None,
        }
    }

    /// Identity for a fresh registration.
    #[must_use]
    pub fn from_registration(first_name: &str, last_name: &str, email: Email) -> Self {
        Self {
            name: format!("{} {}", first_name.trim(), last_name.trim()),
            email,
            phone: None,
            address: None,
        }
    }

    /// Capitalised initials for the avatar, at most two letters.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// Profile form values for this user.
    #[must_use]
    pub fn to_profile_input(&self) -> ProfileInput {
        ProfileInput {
            name: self.name.clone(),
            email: self.email.to_string(),
            phone: self.phone.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
        }
    }
}

/// Why a login attempt was turned away.
///
/// The `Display` text is the toast title.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login Failed")]
    MissingCredentials,
    #[error("Login Failed")]
    InvalidEmail,
}

impl LoginError {
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingCredentials => "Please enter both email and password",
            Self::InvalidEmail => "Please enter a valid email address",
        }
    }
}

/// Login form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

impl LoginInput {
    /// Accept any well-formed email with a non-empty password.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::MissingCredentials`] if either field is blank,
    /// or [`LoginError::InvalidEmail`] if the email does not parse.
    pub fn authenticate(&self) -> Result<UserInfo, LoginError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(LoginError::MissingCredentials);
        }
        let email = Email::parse(&self.email).map_err(|_| LoginError::InvalidEmail)?;
        Ok(UserInfo::from_login(email))
    }
}

/// Registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub accept_terms: bool,
}

impl RegistrationInput {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the inline errors for each invalid field.
    pub fn validate(&self) -> Result<UserInfo, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            self.first_name.trim().is_empty(),
            "first_name",
            "First name is required",
        );
        errors.check(
            self.last_name.trim().is_empty(),
            "last_name",
            "Last name is required",
        );
        let email = Email::parse(&self.email).ok();
        errors.check(email.is_none(), "email", "Please enter a valid email");
        errors.check(self.password.is_empty(), "password", "Password is required");
        errors.check(
            self.password != self.confirm_password,
            "confirm_password",
            "Passwords do not match",
        );
        errors.check(
            !self.accept_terms,
            "accept_terms",
            "Please accept the terms of service and privacy policy",
        );

        let Some(email) = email else {
            return Err(errors);
        };
        errors.into_result(UserInfo::from_registration(
            &self.first_name,
            &self.last_name,
            email,
        ))
    }
}

/// Profile form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

impl ProfileInput {
    /// Validate and apply the form to `user`. Leaves `user` untouched on error.
    ///
    /// # Errors
    ///
    /// Returns the inline errors for an empty name or invalid email.
    pub fn apply(&self, user: &mut UserInfo) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "Full name is required");
        let email = Email::parse(&self.email).ok();
        errors.check(email.is_none(), "email", "Please enter a valid email");

        let Some(email) = email else {
            return Err(errors);
        };
        errors.into_result(())?;
        self.name.trim().clone_into(&mut user.name);
        user.email = email;
        user.phone = optional(&self.phone);
        user.address = optional(&self.address);
        Ok(())
    }
}
