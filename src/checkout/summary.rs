use crate::config::CheckoutConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// The price breakdown shown before an order is placed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    /// `subtotal × tax_rate`, rounded half away from zero to cents.
    pub tax: Decimal,
    /// Flat rate, charged on every order.
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CheckoutSummary {
    /// Prices `subtotal`. `None` if the tax or total overflows a [`Decimal`].
    pub fn compute(subtotal: Decimal, config: &CheckoutConfig) -> Option<Self> {
        let tax = subtotal
            .checked_mul(config.tax_rate)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let total = subtotal.checked_add(tax)?.checked_add(config.shipping)?;
        Some(Self {
            subtotal,
            tax,
            shipping: config.shipping,
            total,
        })
    }
}
