use super::{CheckoutError, CheckoutSummary};
use crate::clients::CartClient;
use crate::config::CheckoutConfig;
use crate::model::{checked_subtotal, CartLineItem, ProductRef};
use rand::Rng;
use tracing::{info, instrument, warn};

/// Used when the shopper leaves the email field blank.
pub const FALLBACK_EMAIL: &str = "customer@example.com";

/// What the shopper sees after placing an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Mock reference of the form `#PP-1234`. Not issued by any backend.
    pub order_number: String,
    pub email: String,
    /// The lines that were ordered, as they were when the order was placed.
    pub items: Vec<CartLineItem>,
    pub summary: CheckoutSummary,
}

/// Runs the simulated checkout against a cart.
#[derive(Clone)]
pub struct CheckoutService {
    cart: CartClient,
    config: CheckoutConfig,
}

impl CheckoutService {
    pub fn new(cart: CartClient, config: CheckoutConfig) -> Self {
        Self { cart, config }
    }

    /// Totals for the cart as it is now.
    pub async fn summary(&self) -> Result<CheckoutSummary, CheckoutError> {
        let subtotal = self.cart.subtotal().await?;
        CheckoutSummary::compute(subtotal, &self.config).ok_or(CheckoutError::TotalOverflow)
    }

    /// Places an order for everything in the cart.
    ///
    /// Waits the configured processing delay, then drains the cart in a single
    /// actor message. Lines added by other clients during the delay are part
    /// of the order; the confirmation lists exactly what was drained.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] if there is nothing to order, and
    /// [`CheckoutError::TotalOverflow`] if the total cannot be represented.
    /// In both cases the cart keeps its lines.
    #[instrument(skip(self))]
    pub async fn place_order(&self, email: &str) -> Result<OrderConfirmation, CheckoutError> {
        let items = self.cart.items().await?;
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let summary = self.price(&items)?;
        info!(lines = items.len(), total = %summary.total, "Processing order");

        tokio::time::sleep(self.config.processing_delay).await;

        let items = self.cart.drain().await?;
        if items.is_empty() {
            warn!("Cart was emptied while the order was processing");
            return Err(CheckoutError::EmptyCart);
        }
        let summary = match self.price(&items) {
            Ok(summary) => summary,
            Err(e) => {
                self.restore(items).await?;
                return Err(e);
            }
        };

        let email = if email.trim().is_empty() {
            FALLBACK_EMAIL.to_string()
        } else {
            email.trim().to_string()
        };
        let order_number = generate_order_number();
        info!(%order_number, lines = items.len(), total = %summary.total, "Order placed");

        Ok(OrderConfirmation {
            order_number,
            email,
            items,
            summary,
        })
    }

    fn price(&self, items: &[CartLineItem]) -> Result<CheckoutSummary, CheckoutError> {
        checked_subtotal(items)
            .and_then(|subtotal| CheckoutSummary::compute(subtotal, &self.config))
            .ok_or(CheckoutError::TotalOverflow)
    }

    /// Puts drained lines back after a failed order.
    async fn restore(&self, items: Vec<CartLineItem>) -> Result<(), CheckoutError> {
        warn!(lines = items.len(), "Order not placed, returning lines to the cart");
        for item in items {
            let product = ProductRef::new(item.id, item.name, item.price, item.image);
            self.cart.add_items(product, item.quantity).await?;
        }
        Ok(())
    }
}

/// `#PP-` followed by a random number in `1000..=9999`.
fn generate_order_number() -> String {
    let number: u16 = rand::rng().random_range(1000..=9999);
    format!("#PP-{}", number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::CartReply;
    use crate::framework::mock::MockClient;
    use crate::model::Cart;
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn config() -> CheckoutConfig {
        CheckoutConfig {
            processing_delay: Duration::from_millis(1),
            ..CheckoutConfig::default()
        }
    }

    #[test]
    fn test_order_number_format() {
        for _ in 0..100 {
            let number = generate_order_number();
            let digits = number.strip_prefix("#PP-").expect("prefix");
            let value: u16 = digits.parse().unwrap();
            assert!((1000..=9999).contains(&value));
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected_without_clearing() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_execute().return_ok(CartReply::Items(vec![]));

        let checkout = CheckoutService::new(CartClient::new(mock.client()), config());
        let result = checkout.place_order("maker@example.com").await;

        assert_eq!(result, Err(CheckoutError::EmptyCart));
        // Only the Items query was expected; a Drain would have panicked the mock.
        mock.verify();
    }

    fn copper(quantity: u32) -> CartLineItem {
        CartLineItem {
            id: "7".to_string(),
            name: "Copper Metal Composite PLA".to_string(),
            price: Decimal::new(3999, 2),
            image: "copper.jpg".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_place_order_drains_and_confirms() {
        let line = copper(2);
        let mut mock = MockClient::<Cart>::new();
        mock.expect_execute().return_ok(CartReply::Items(vec![line.clone()]));
        mock.expect_execute().return_ok(CartReply::Drained(vec![line.clone()]));

        let checkout = CheckoutService::new(CartClient::new(mock.client()), config());
        let confirmation = checkout.place_order("  ").await.unwrap();

        assert_eq!(confirmation.email, FALLBACK_EMAIL);
        assert_eq!(confirmation.items, vec![line]);
        assert_eq!(confirmation.summary.subtotal, Decimal::new(7998, 2));
        assert!(confirmation.order_number.starts_with("#PP-"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_confirmation_covers_lines_added_while_processing() {
        let iron = CartLineItem {
            id: "5".to_string(),
            name: "Magnetic Iron PLA Composite".to_string(),
            price: Decimal::new(2999, 2),
            image: "iron.jpg".to_string(),
            quantity: 1,
        };
        let mut mock = MockClient::<Cart>::new();
        mock.expect_execute().return_ok(CartReply::Items(vec![iron.clone()]));
        mock.expect_execute()
            .return_ok(CartReply::Drained(vec![iron.clone(), copper(1)]));

        let checkout = CheckoutService::new(CartClient::new(mock.client()), config());
        let confirmation = checkout.place_order("maker@example.com").await.unwrap();

        assert_eq!(confirmation.items, vec![iron, copper(1)]);
        assert_eq!(confirmation.summary.subtotal, Decimal::new(6998, 2));
        mock.verify();
    }

    #[tokio::test]
    async fn test_cart_emptied_while_processing_is_empty_order() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_execute().return_ok(CartReply::Items(vec![copper(1)]));
        mock.expect_execute().return_ok(CartReply::Drained(vec![]));

        let checkout = CheckoutService::new(CartClient::new(mock.client()), config());
        assert_eq!(
            checkout.place_order("maker@example.com").await,
            Err(CheckoutError::EmptyCart)
        );
        mock.verify();
    }
}
