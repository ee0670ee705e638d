//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then
//! [`expect_execute`] / [`expect_flush`] to assert what the client sent.
//! For scripted replies use [`MockClient`].

use crate::framework::{Aggregate, AggregateClient, AggregateRequest, FrameworkError, Lifecycle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

enum Expectation<A: Aggregate> {
    Execute {
        response: Result<A::Reply, FrameworkError>,
    },
    Flush {
        response: Result<(), FrameworkError>,
    },
}

/// A mock client that answers requests from a queue of scripted replies.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Cart>::new();
/// mock.expect_execute().return_ok(CartReply::Subtotal(Decimal::ZERO));
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<A: Aggregate> {
    client: AggregateClient<A>,
    expectations: Arc<Mutex<VecDeque<Expectation<A>>>>,
    _lifecycle: watch::Sender<Lifecycle>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<A: Aggregate> MockClient<A> {
    /// Creates a new mock client with no expectations. It reports `Ready`.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<AggregateRequest<A>>(100);
        let (lifecycle, lifecycle_rx) = watch::channel(Lifecycle::Ready);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        AggregateRequest::Execute { respond_to, .. },
                        Some(Expectation::Execute { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (AggregateRequest::Flush { respond_to }, Some(Expectation::Flush { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: AggregateClient::new(sender, lifecycle_rx),
            expectations,
            _lifecycle: lifecycle,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> AggregateClient<A> {
        self.client.clone()
    }

    /// Expects an `execute` call.
    pub fn expect_execute(&mut self) -> ExecuteExpectationBuilder<A> {
        ExecuteExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `flush` call that succeeds.
    pub fn expect_flush(&mut self) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Flush { response: Ok(()) });
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<A: Aggregate> Default for MockClient<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `execute` expectations.
pub struct ExecuteExpectationBuilder<A: Aggregate> {
    expectations: Arc<Mutex<VecDeque<Expectation<A>>>>,
}

impl<A: Aggregate> ExecuteExpectationBuilder<A> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, reply: A::Reply) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute { response: Ok(reply) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Execute {
                response: Err(error),
            });
    }
}

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// A client wrapper such as [`CartClient`](crate::clients::CartClient) only
/// translates calls into commands. Testing it does not need a running actor:
/// hand it this client, read what arrives on `receiver`, and answer through the
/// `respond_to` sender. The client reports `Ready`.
pub fn create_mock_client<A: Aggregate>(
    buffer_size: usize,
) -> (AggregateClient<A>, mpsc::Receiver<AggregateRequest<A>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, lifecycle_rx) = watch::channel(Lifecycle::Ready);
    (AggregateClient::new(sender, lifecycle_rx), receiver)
}

/// Helper to verify that the next message is an Execute request
pub async fn expect_execute<A: Aggregate>(
    receiver: &mut mpsc::Receiver<AggregateRequest<A>>,
) -> Option<(
    A::Command,
    oneshot::Sender<Result<A::Reply, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(AggregateRequest::Execute {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Flush request
pub async fn expect_flush<A: Aggregate>(
    receiver: &mut mpsc::Receiver<AggregateRequest<A>>,
) -> Option<oneshot::Sender<Result<(), FrameworkError>>> {
    match receiver.recv().await {
        Some(AggregateRequest::Flush { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::{CartCommand, CartReply};
    use crate::model::Cart;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);

        let task = tokio::spawn(async move { client.execute(CartCommand::ItemCount).await });

        let (command, responder) = expect_execute(&mut receiver)
            .await
            .expect("Expected Execute request");
        assert!(matches!(command, CartCommand::ItemCount));
        responder.send(Ok(CartReply::ItemCount(4))).unwrap();

        let reply = task.await.unwrap().unwrap();
        assert!(matches!(reply, CartReply::ItemCount(4)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_execute().return_ok(CartReply::Cleared);
        mock.expect_flush();

        let client = mock.client();
        client.wait_ready().await.unwrap();

        let reply = client.execute(CartCommand::Clear).await.unwrap();
        assert!(matches!(reply, CartReply::Cleared));
        client.flush().await.unwrap();

        mock.verify();
    }
}
