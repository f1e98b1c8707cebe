//! Passenger details form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Email;
use crate::validation::ValidationErrors;

/// Salutation offered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    Mr,
    Mrs,
    Miss,
    Ms,
    Dr,
}

impl Title {
    pub const ALL: [Self; 5] = [Self::Mr, Self::Mrs, Self::Miss, Self::Ms, Self::Dr];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mr => "Mr",
            Self::Mrs => "Mrs",
            Self::Miss => "Miss",
            Self::Ms => "Ms",
            Self::Dr => "Dr",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s.trim())
    }
}

/// In-flight meal choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MealPreference {
    #[default]
    Standard,
    Vegetarian,
    Vegan,
    GlutenFree,
    Kosher,
    Halal,
}

impl MealPreference {
    pub const ALL: [Self; 6] = [
        Self::Standard,
        Self::Vegetarian,
        Self::Vegan,
        Self::GlutenFree,
        Self::Kosher,
        Self::Halal,
    ];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::GlutenFree => "gluten_free",
            Self::Kosher => "kosher",
            Self::Halal => "halal",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten Free",
            Self::Kosher => "Kosher Meal",
            Self::Halal => "Halal Meal",
        }
    }

    /// Parse a form value, defaulting to the standard meal.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .unwrap_or_default()
    }
}

/// Earliest accepted date of birth.
const OLDEST_BIRTH_DATE: Option<NaiveDate> = NaiveDate::from_ymd_opt(1900, 1, 1);

/// Raw passenger form input, kept as typed so the form can be re-rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerInput {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD` as sent by a date input.
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub passport_number: String,
    pub save_info: bool,
    pub add_baggage: bool,
    pub meal_preference: String,
}

/// Validated passenger details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub email: Email,
    pub phone: String,
    pub nationality: String,
    pub passport_number: Option<String>,
    pub save_info: bool,
    pub add_baggage: bool,
    pub meal_preference: MealPreference,
}

impl PassengerDetails {
    /// `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Turn details back into form input, e.g. to prefill a later booking.
    #[must_use]
    pub fn to_input(&self) -> PassengerInput {
        PassengerInput {
            title: self.title.as_str().to_owned(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            date_of_birth: self.date_of_birth.format("%Y-%m-%d").to_string(),
            email: self.email.to_string(),
            phone: self.phone.clone(),
            nationality: self.nationality.clone(),
            passport_number: self.passport_number.clone().unwrap_or_default(),
            save_info: self.save_info,
            add_baggage: self.add_baggage,
            meal_preference: self.meal_preference.as_str().to_owned(),
        }
    }
}

fn too_short(value: &str, min: usize) -> bool {
    value.trim().chars().count() < min
}

impl PassengerInput {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the inline errors for each invalid field.
    pub fn validate(&self, today: NaiveDate) -> Result<PassengerDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = Title::parse(&self.title);
        errors.check(title.is_none(), "title", "Please select a title");
        errors.check(too_short(&self.first_name, 2), "first_name", "First name is required");
        errors.check(too_short(&self.last_name, 2), "last_name", "Last name is required");

        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").ok();
        match date_of_birth {
            None => errors.add("date_of_birth", "Date of birth is required"),
            Some(dob) if dob > today => {
                errors.add("date_of_birth", "Date of birth cannot be in the future");
            }
            Some(dob) if OLDEST_BIRTH_DATE.is_some_and(|oldest| dob < oldest) => {
                errors.add("date_of_birth", "Date of birth must be after 1900");
            }
            Some(_) => {}
        }

        let email = Email::parse(&self.email).ok();
        errors.check(email.is_none(), "email", "Please enter a valid email");
        errors.check(too_short(&self.phone, 6), "phone", "Phone number is required");
        errors.check(too_short(&self.nationality, 2), "nationality", "Nationality is required");

        let (Some(title), Some(date_of_birth), Some(email)) = (title, date_of_birth, email) else {
            return Err(errors);
        };
        let passport = self.passport_number.trim();

        errors.into_result(PassengerDetails {
            title,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            date_of_birth,
            email,
            phone: self.phone.trim().to_owned(),
            nationality: self.nationality.trim().to_owned(),
            passport_number: (!passport.is_empty()).then(|| passport.to_owned()),
            save_info: self.save_info,
            add_baggage: self.add_baggage,
            meal_preference: MealPreference::parse(&self.meal_preference),
        })
    }
}
