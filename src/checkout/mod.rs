//! # Checkout
//!
//! Order totals and the simulated order placement that ends a shopping session.
//!
//! There is no payment integration: [`CheckoutService::place_order`] waits a
//! configured processing delay, empties the cart, and hands back a mock order
//! number. Clearing the cart is the only lasting effect.

pub mod error;
pub mod service;
pub mod summary;

pub use error::*;
pub use service::*;
pub use summary::*;
