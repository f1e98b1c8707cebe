//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Fares in the catalog are whole dollars, but surcharges and totals go
/// through `Decimal` so nothing is ever rounded through a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price of `units` whole dollars.
    #[must_use]
    pub fn usd(units: i64) -> Self {
        Self::new(Decimal::from(units), CurrencyCode::USD)
    }

    /// A zero price in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Returns this price increased by `amount` in the same currency.
    #[must_use]
    pub fn plus(self, amount: Decimal) -> Self {
        Self::new(self.amount + amount, self.currency_code)
    }

    /// Whole units of the amount, rounded down.
    #[must_use]
    pub fn whole_units(&self) -> i64 {
        self.amount.floor().try_into().unwrap_or(i64::MAX)
    }
}

impl fmt::Display for Price {
    /// Formats as `$299` for whole amounts and `$299.50` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_code.symbol();
        if self.amount.fract().is_zero() {
            write!(f, "{symbol}{}", self.amount.trunc())
        } else {
            write!(f, "{symbol}{:.2}", self.amount)
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::INR => "₹",
        }
    }

    /// The three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::INR => "INR",
        }
    }
}
