//! # Cart Client
//!
//! Provides a high-level API for interacting with the cart actor.
//! It wraps an `AggregateClient<Cart>` and exposes one method per cart operation.
use crate::cart_actor::{CartCommand, CartError, CartReply};
use crate::clients::actor_client::ActorClient;
use crate::framework::{AggregateClient, FrameworkError};
use crate::model::{AddOutcome, Cart, CartLineItem, ProductRef};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
///
/// Cheap to clone; give each screen its own copy. Mutations resolve once the
/// in-memory cart has changed; persistence happens behind them (see
/// [`ActorClient::flush`]).
#[derive(Clone)]
pub struct CartClient {
    inner: AggregateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: AggregateClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &AggregateClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CartError::ActorCommunicationError(e.to_string())
    }
}

impl CartClient {
    async fn send(&self, command: CartCommand) -> Result<CartReply, CartError> {
        self.inner.execute(command).await.map_err(Self::map_error)
    }

    /// Add one unit of `product`.
    pub async fn add_item(&self, product: ProductRef) -> Result<AddOutcome, CartError> {
        self.add_items(product, 1).await
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn add_items(&self, product: ProductRef, quantity: u32) -> Result<AddOutcome, CartError> {
        debug!(?product, quantity, "Sending request");
        match self.send(CartCommand::Add { product, quantity }).await? {
            CartReply::Added(outcome) => Ok(outcome),
            _ => Err(CartError::UnexpectedReply("Add")),
        }
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: &str) -> Result<bool, CartError> {
        debug!("Sending request");
        match self.send(CartCommand::Remove { id: id.to_string() }).await? {
            CartReply::Removed(removed) => Ok(removed),
            _ => Err(CartError::UnexpectedReply("Remove")),
        }
    }

    /// Set the quantity for `id`; zero removes the line.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, id: &str, quantity: u32) -> Result<bool, CartError> {
        debug!("Sending request");
        match self
            .send(CartCommand::SetQuantity {
                id: id.to_string(),
                quantity,
            })
            .await?
        {
            CartReply::QuantitySet(changed) => Ok(changed),
            _ => Err(CartError::UnexpectedReply("SetQuantity")),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        match self.send(CartCommand::Clear).await? {
            CartReply::Cleared => Ok(()),
            _ => Err(CartError::UnexpectedReply("Clear")),
        }
    }

    /// Empty the cart and return what it held. Nothing can slip in between.
    #[instrument(skip(self))]
    pub async fn drain(&self) -> Result<Vec<CartLineItem>, CartError> {
        debug!("Sending request");
        match self.send(CartCommand::Drain).await? {
            CartReply::Drained(items) => Ok(items),
            _ => Err(CartError::UnexpectedReply("Drain")),
        }
    }

    pub async fn items(&self) -> Result<Vec<CartLineItem>, CartError> {
        match self.send(CartCommand::Items).await? {
            CartReply::Items(items) => Ok(items),
            _ => Err(CartError::UnexpectedReply("Items")),
        }
    }

    /// Total units across all lines, for the cart badge.
    pub async fn item_count(&self) -> Result<u64, CartError> {
        match self.send(CartCommand::ItemCount).await? {
            CartReply::ItemCount(count) => Ok(count),
            _ => Err(CartError::UnexpectedReply("ItemCount")),
        }
    }

    pub async fn subtotal(&self) -> Result<Decimal, CartError> {
        match self.send(CartCommand::Subtotal).await? {
            CartReply::Subtotal(subtotal) => Ok(subtotal),
            _ => Err(CartError::UnexpectedReply("Subtotal")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_execute, expect_flush};

    fn iron() -> ProductRef {
        ProductRef::new("5", "Magnetic Iron PLA Composite", Decimal::new(2999, 2), "iron.jpg")
    }

    #[tokio::test]
    async fn test_add_item_defaults_to_one() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart = CartClient::new(client);

        let task = tokio::spawn(async move { cart.add_item(iron()).await });

        let (command, responder) = expect_execute(&mut receiver)
            .await
            .expect("Expected Execute request");
        match command {
            CartCommand::Add { product, quantity } => {
                assert_eq!(product.id, "5");
                assert_eq!(quantity, 1);
            }
            other => panic!("Expected Add, got {:?}", other),
        }
        responder
            .send(Ok(CartReply::Added(AddOutcome::Added { quantity: 1 })))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), AddOutcome::Added { quantity: 1 });
    }

    #[tokio::test]
    async fn test_set_quantity_sends_id_and_quantity() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart = CartClient::new(client);

        let task = tokio::spawn(async move { cart.set_quantity("9", 5).await });

        let (command, responder) = expect_execute(&mut receiver).await.unwrap();
        match command {
            CartCommand::SetQuantity { id, quantity } => {
                assert_eq!(id, "9");
                assert_eq!(quantity, 5);
            }
            other => panic!("Expected SetQuantity, got {:?}", other),
        }
        responder.send(Ok(CartReply::QuantitySet(false))).unwrap();

        assert!(!task.await.unwrap().unwrap());
    }

    #[tokio::test]
    async fn test_mismatched_reply_is_an_error() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart = CartClient::new(client);

        let task = tokio::spawn(async move { cart.subtotal().await });

        let (_, responder) = expect_execute(&mut receiver).await.unwrap();
        responder.send(Ok(CartReply::ItemCount(1))).unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CartError::UnexpectedReply("Subtotal"))
        );
    }

    #[tokio::test]
    async fn test_flush_goes_to_actor() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart = CartClient::new(client);
        assert!(!cart.is_loading());

        let task = tokio::spawn(async move { cart.flush().await });
        let responder = expect_flush(&mut receiver).await.expect("Expected Flush request");
        responder.send(Ok(())).unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_cart_error() {
        let (client, receiver) = create_mock_client::<Cart>(10);
        drop(receiver);
        let cart = CartClient::new(client);

        let result = cart.item_count().await;
        assert!(matches!(result, Err(CartError::ActorCommunicationError(_))));
    }
}
