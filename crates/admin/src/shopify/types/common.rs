//! Common domain types shared across Shopify Admin API.

use serde::{Deserialize, Serialize};

use bundle_builder_core::{CurrencyCode, Price};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code, as sent by Shopify (`MoneyV2`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Convert to a display price.
    ///
    /// Unparseable amounts are treated as zero and logged.
    #[must_use]
    pub fn to_price(&self) -> Price {
        Price::parse(&self.amount, &self.currency_code).unwrap_or_else(|| {
            tracing::warn!(amount = %self.amount, "Unparseable money amount, using 0");
            Price::new(0.0, CurrencyCode::from_code(&self.currency_code))
        })
    }
}
