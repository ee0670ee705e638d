//! Aggregate trait implementation for the Cart.
//!
//! This module contains the [`Aggregate`] implementation that lets [`Cart`] be
//! owned by the generic [`AggregateActor`](crate::framework::AggregateActor).
//! The cart logic itself lives on [`Cart`]; this layer maps commands onto it and
//! raises notifications.

use super::actions::{CartCommand, CartReply};
use super::notify::{CartNotice, CartContext};
use crate::framework::Aggregate;
use crate::model::{AddOutcome, Cart, CartLineItem};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl Aggregate for Cart {
    type Command = CartCommand;
    type Reply = CartReply;
    type Snapshot = Vec<CartLineItem>;
    type Context = CartContext;
    type Error = Infallible;

    fn restore(snapshot: Vec<CartLineItem>) -> Self {
        Cart::from_items(snapshot)
    }

    fn snapshot(&self) -> Vec<CartLineItem> {
        self.items().to_vec()
    }

    fn mutates(command: &CartCommand) -> bool {
        matches!(
            command,
            CartCommand::Add { .. }
                | CartCommand::Remove { .. }
                | CartCommand::SetQuantity { .. }
                | CartCommand::Clear
                | CartCommand::Drain
        )
    }

    /// Applies a cart command.
    ///
    /// # Notifications
    /// `Add` raises "Added to Cart" for a new line and "Cart Updated" when an
    /// existing line grew. A zero-quantity add raises nothing.
    async fn handle(&mut self, command: CartCommand, ctx: &CartContext) -> Result<CartReply, Infallible> {
        let reply = match command {
            CartCommand::Add { product, quantity } => {
                let name = product.name.clone();
                let outcome = self.add_item(product, quantity);
                match &outcome {
                    AddOutcome::Added { .. } => ctx.notify(&CartNotice::added(&name)),
                    AddOutcome::QuantityUpdated { quantity } => {
                        ctx.notify(&CartNotice::quantity_updated(&name, *quantity))
                    }
                    AddOutcome::Ignored => {}
                }
                CartReply::Added(outcome)
            }
            CartCommand::Remove { id } => CartReply::Removed(self.remove_item(&id)),
            CartCommand::SetQuantity { id, quantity } => {
                CartReply::QuantitySet(self.set_quantity(&id, quantity))
            }
            CartCommand::Clear => {
                self.clear();
                CartReply::Cleared
            }
            CartCommand::Drain => CartReply::Drained(self.drain()),
            CartCommand::Items => CartReply::Items(self.items().to_vec()),
            CartCommand::ItemCount => CartReply::ItemCount(self.item_count()),
            CartCommand::Subtotal => CartReply::Subtotal(self.subtotal()),
        };
        Ok(reply)
    }
}
