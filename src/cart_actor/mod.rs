//! # Cart Actor
//!
//! This module implements the cart aggregate as an actor: one task owns the
//! [`Cart`], applies [`CartCommand`]s in order, hydrates from storage at startup
//! and persists after every mutation.
//!
//! ## Structure
//!
//! - [`entity`] - [`Aggregate`](crate::framework::Aggregate) implementation for [`Cart`]
//! - [`actions`] - [`CartCommand`] and [`CartReply`]
//! - [`notify`] - [`Notifier`] sinks for "Added to Cart" / "Cart Updated"
//! - [`error`] - [`CartError`] returned by the client
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use filament_cart::cart_actor::{self, LogNotifier, CART_STORAGE_KEY};
//! use filament_cart::model::ProductRef;
//! use filament_cart::storage::MemoryStorage;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, cart) = cart_actor::new(32, Arc::new(MemoryStorage::new()), CART_STORAGE_KEY);
//!     tokio::spawn(actor.run(Arc::new(LogNotifier)));
//!
//!     let iron = ProductRef::new("5", "Magnetic Iron PLA Composite", Decimal::new(2999, 2), "iron.jpg");
//!     cart.add_items(iron, 3).await?;
//!     assert_eq!(cart.subtotal().await?, Decimal::new(8997, 2));
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;
pub mod notify;

pub use actions::*;
pub use error::*;
pub use notify::*;

use crate::clients::CartClient;
use crate::framework::AggregateActor;
use crate::model::Cart;
use crate::storage::Storage;
use std::sync::Arc;

/// Storage key the cart blob lives under unless configured otherwise.
pub const CART_STORAGE_KEY: &str = "@protopasta_cart";

/// Creates a new Cart actor and its client.
pub fn new(
    buffer_size: usize,
    storage: Arc<dyn Storage>,
    key: impl Into<String>,
) -> (AggregateActor<Cart>, CartClient) {
    let (actor, generic_client) = AggregateActor::new(buffer_size, storage, key);
    (actor, CartClient::new(generic_client))
}
