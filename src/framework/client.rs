//! # Generic Aggregate Client
//!
//! The caller-facing half of an [`AggregateActor`](crate::framework::AggregateActor).

use crate::framework::aggregate::Aggregate;
use crate::framework::error::FrameworkError;
use crate::framework::message::{AggregateRequest, Lifecycle};
use tokio::sync::{mpsc, oneshot, watch};

/// A type-safe client for interacting with an `AggregateActor`.
///
/// Holds only a channel sender and a lifecycle receiver, so cloning is cheap.
/// Hand one clone to every consumer that needs the aggregate.
pub struct AggregateClient<A: Aggregate> {
    sender: mpsc::Sender<AggregateRequest<A>>,
    lifecycle: watch::Receiver<Lifecycle>,
}

impl<A: Aggregate> Clone for AggregateClient<A> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            lifecycle: self.lifecycle.clone(),
        }
    }
}

impl<A: Aggregate> AggregateClient<A> {
    pub fn new(
        sender: mpsc::Sender<AggregateRequest<A>>,
        lifecycle: watch::Receiver<Lifecycle>,
    ) -> Self {
        Self { sender, lifecycle }
    }

    pub async fn execute(&self, command: A::Command) -> Result<A::Reply, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AggregateRequest::Execute {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Resolves once every snapshot queued before this call has been written.
    pub async fn flush(&self) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(AggregateRequest::Flush { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// The current hydration state.
    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.borrow()
    }

    /// Waits until hydration has finished.
    pub async fn wait_ready(&self) -> Result<(), FrameworkError> {
        let mut lifecycle = self.lifecycle.clone();
        let ready = lifecycle
            .wait_for(|state| *state == Lifecycle::Ready)
            .await
            .map(|_| ());
        ready.map_err(|_| FrameworkError::ActorClosed)
    }
}
