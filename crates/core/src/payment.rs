//! Payment form validation.
//!
//! Nothing is charged. The site waits [`PROCESSING_DELAY`] to imitate a
//! payment gateway and then treats every validated payment as successful.
//! Only the last four card digits are kept after validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationErrors;

/// How long the simulated gateway takes to answer.
pub const PROCESSING_DELAY: Duration = Duration::from_secs(2);

/// Minimum digits in a card number.
const MIN_CARD_DIGITS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
    GooglePay,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::PayPal, Self::GooglePay];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::PayPal => "paypal",
            Self::GooglePay => "google_pay",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit/Debit Card",
            Self::PayPal => "PayPal",
            Self::GooglePay => "Google Pay",
        }
    }

    /// Parse a form value, defaulting to card.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .unwrap_or_default()
    }
}

/// Raw payment form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    pub cardholder_name: String,
    pub card_number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

/// What survives of a validated payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: PaymentMethod,
    pub cardholder_name: Option<String>,
    pub card_last4: Option<String>,
}

impl PaymentDetails {
    /// `"Credit/Debit Card ending in 4242"`, or the method name.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.card_last4 {
            Some(last4) => format!("{} ending in {last4}", self.method.label()),
            None => self.method.label().to_owned(),
        }
    }
}

fn card_digits(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(|c| *c != ' ').collect();
    (digits.len() >= MIN_CARD_DIGITS && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
}

fn valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.trim().split_once('/') else {
        return false;
    };
    let two_digits = |s: &str| s.len() == 2 && s.chars().all(|c| c.is_ascii_digit());
    two_digits(month)
        && two_digits(year)
        && month.parse::<u8>().is_ok_and(|m| (1..=12).contains(&m))
}

fn valid_cvv(cvv: &str) -> bool {
    let cvv = cvv.trim();
    (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit())
}

impl PaymentInput {
    /// Validate the form. Card fields are only checked for card payments.
    ///
    /// # Errors
    ///
    /// Returns the inline errors for each invalid card field.
    pub fn validate(&self) -> Result<PaymentDetails, ValidationErrors> {
        if self.method != PaymentMethod::CreditCard {
            return Ok(PaymentDetails {
                method: self.method,
                cardholder_name: None,
                card_last4: None,
            });
        }

        let mut errors = ValidationErrors::new();
        let name = self.cardholder_name.trim();
        errors.check(name.chars().count() < 2, "cardholder_name", "Cardholder name is required");
        let digits = card_digits(&self.card_number);
        errors.check(digits.is_none(), "card_number", "Valid card number is required");
        errors.check(!valid_expiry(&self.expiry), "expiry", "Expiry date must be MM/YY");
        errors.check(!valid_cvv(&self.cvv), "cvv", "CVV must be 3 or 4 digits");

        let last4 = digits
            .as_deref()
            .and_then(|d| d.get(d.len().saturating_sub(4)..))
            .map(str::to_owned);
        errors.into_result(PaymentDetails {
            method: self.method,
            cardholder_name: Some(name.to_owned()),
            card_last4: last4,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn card() -> PaymentInput {
        PaymentInput {
            method: PaymentMethod::CreditCard,
            cardholder_name: "Priya Sharma".to_owned(),
            card_number: "4242 4242 4242 4242".to_owned(),
            expiry: "09/27".to_owned(),
            cvv: "123".to_owned(),
        }
    }

    #[test]
    fn test_card_keeps_only_last_four() {
        let details = card().validate().unwrap();
        assert_eq!(details.card_last4.as_deref(), Some("4242"));
        assert_eq!(details.summary(), "Credit/Debit Card ending in 4242");
        let json = serde_json::to_string(&details).unwrap();
        assert!(!json.contains("4242 4242"));
        assert!(!json.contains("123"));
    }

    #[test]
    fn test_card_field_errors() {
        let input = PaymentInput {
            cardholder_name: "P".to_owned(),
            card_number: "4242 4242 4242".to_owned(),
            expiry: "13/27".to_owned(),
            cvv: "12".to_owned(),
            ..card()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.has("cardholder_name"));
        assert!(errors.has("card_number"));
        assert!(errors.has("expiry"));
        assert!(errors.has("cvv"));
    }

    #[test]
    fn test_expiry_format() {
        assert!(valid_expiry("01/30"));
        assert!(valid_expiry("12/25"));
        assert!(!valid_expiry("00/25"));
        assert!(!valid_expiry("1/25"));
        assert!(!valid_expiry("0125"));
        assert!(!valid_expiry("ab/cd"));
    }

    #[test]
    fn test_card_number_rejects_letters() {
        let input = PaymentInput {
            card_number: "4242 4242 4242 42AB".to_owned(),
            ..card()
        };
        assert!(input.validate().unwrap_err().has("card_number"));
    }

    #[test]
    fn test_wallets_skip_card_checks() {
        let input = PaymentInput {
            method: PaymentMethod::PayPal,
            ..PaymentInput::default()
        };
        let details = input.validate().unwrap();
        assert_eq!(details.card_last4, None);
        assert_eq!(details.summary(), "PayPal");
    }

    #[test]
    fn test_four_digit_cvv() {
        let input = PaymentInput {
            cvv: "1234".to_owned(),
            ..card()
        };
        assert!(input.validate().is_ok());
    }
}
