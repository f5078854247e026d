//! Bundle pricing.
//!
//! `total` is the sum of each member's minimum variant price and
//! `discounted = total * (1 - discount / 100)`. The discount is applied as
//! given: values above 100 produce a negative price, values below 0 inflate
//! it. Arithmetic is plain `f64`.

use serde::Serialize;

use crate::types::{CurrencyCode, Price};

/// Total and discounted price of a bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundlePricing {
    /// Sum of member prices.
    pub total: f64,
    /// Total after the percentage discount.
    pub discounted: f64,
    /// Discount percentage that was applied.
    pub discount: i64,
    /// Currency used for display.
    pub currency_code: CurrencyCode,
}

impl BundlePricing {
    /// Price a bundle from its member prices.
    ///
    /// The display currency is taken from the first price; an empty bundle
    /// prices at zero in USD.
    #[must_use]
    pub fn calculate<'a, I>(prices: I, discount: i64) -> Self
    where
        I: IntoIterator<Item = &'a Price>,
    {
        let mut prices = prices.into_iter().peekable();
        let currency_code = prices
            .peek()
            .map(|p| p.currency_code.clone())
            .unwrap_or_default();
        let total: f64 = prices.map(|p| p.amount).sum();

        Self {
            total,
            discounted: apply_discount(total, discount),
            discount,
            currency_code,
        }
    }

    /// Formatted total (e.g., "$30.00").
    #[must_use]
    pub fn total_display(&self) -> String {
        self.currency_code.format(self.total)
    }

    /// Formatted discounted total (e.g., "$27.00").
    #[must_use]
    pub fn discounted_display(&self) -> String {
        self.currency_code.format(self.discounted)
    }
}

/// Apply a flat percentage discount to an amount.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Discounts are small integers
pub fn apply_discount(total: f64, discount: i64) -> f64 {
    total * (1.0 - discount as f64 / 100.0)
}
