//! Error types for checkout.

use crate::cart_actor::CartError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// The order total does not fit in a decimal.
    #[error("Order total cannot be represented")]
    TotalOverflow,

    #[error(transparent)]
    Cart(#[from] CartError),
}
