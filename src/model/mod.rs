//! Pure data structures for the cart and the products it references.
//!
//! [`Cart`] is the aggregate managed by an [`AggregateActor`](crate::framework::AggregateActor);
//! see [`crate::cart_actor`] for the trait implementation.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
