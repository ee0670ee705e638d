//! Commands for the Cart actor.
//!
//! Every cart operation, mutating or not, is a [`CartCommand`] processed in
//! arrival order by the actor. Each command has exactly one matching
//! [`CartReply`] variant.

use crate::model::{AddOutcome, CartLineItem, ProductRef};
use rust_decimal::Decimal;

/// Operations on the cart aggregate.
#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Adds `quantity` units, merging into an existing line with the same id.
    Add { product: ProductRef, quantity: u32 },
    /// Removes a line. Unknown ids are ignored.
    Remove { id: String },
    /// Overwrites a line's quantity; zero removes it. Unknown ids are ignored.
    SetQuantity { id: String, quantity: u32 },
    /// Empties the cart.
    Clear,
    /// Empties the cart and hands back the lines it held, in one step.
    Drain,
    /// Lists the lines in insertion order.
    Items,
    /// Sum of quantities.
    ItemCount,
    /// Sum of `price × quantity`.
    Subtotal,
}

/// Results from CartCommands - variants match 1:1 with CartCommand
#[derive(Debug, Clone, PartialEq)]
pub enum CartReply {
    Added(AddOutcome),
    /// `true` if a line was removed.
    Removed(bool),
    /// `true` if the cart changed.
    QuantitySet(bool),
    Cleared,
    Drained(Vec<CartLineItem>),
    Items(Vec<CartLineItem>),
    ItemCount(u64),
    Subtotal(Decimal),
}
