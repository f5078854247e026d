//! Price representation for bundle display.
//!
//! Amounts are plain `f64`. Shopify sends decimal strings, but nothing here is
//! ever charged at checkout; prices are only summed and shown rounded to two
//! places.

use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: f64, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a Shopify `MoneyV2` pair (`amount` is a decimal string).
    ///
    /// Returns `None` when the amount is not a number.
    #[must_use]
    pub fn parse(amount: &str, currency_code: &str) -> Option<Self> {
        let amount = amount.trim().parse::<f64>().ok()?;
        Some(Self::new(amount, CurrencyCode::from_code(currency_code)))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        self.currency_code.format(self.amount)
    }
}

/// ISO 4217 currency codes.
///
/// Codes without a dedicated variant are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    Other(String),
}

impl CurrencyCode {
    /// Map a currency code string to its variant.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Self::USD,
            "EUR" => Self::EUR,
            "GBP" => Self::GBP,
            "CAD" => Self::CAD,
            "AUD" => Self::AUD,
            other => Self::Other(other.to_string()),
        }
    }

    /// The ISO code string.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::Other(code) => code,
        }
    }

    /// Currency symbol, if the currency has a well-known one.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::USD | Self::CAD | Self::AUD => Some("$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::Other(_) => None,
        }
    }

    /// Format an amount in this currency, rounded to two decimal places.
    ///
    /// Negative amounts keep their sign ahead of the symbol (`-$5.00`).
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        let sign = if amount < 0.0 && format!("{:.2}", amount.abs()) != "0.00" {
            "-"
        } else {
            ""
        };
        let abs = amount.abs();
        match self.symbol() {
            Some(symbol) => format!("{sign}{symbol}{abs:.2}"),
            None => format!("{sign}{abs:.2} {}", self.code()),
        }
    }
}
