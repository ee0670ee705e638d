//! # The Aggregate Contract
//!
//! [`Aggregate`] is what a state type implements to be owned by an
//! [`AggregateActor`](crate::framework::AggregateActor).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Trait that any state container must implement to be managed by `AggregateActor`.
///
/// # Architecture Note
/// The actor owns exactly one value of the aggregate and feeds it commands one
/// at a time. The aggregate itself knows nothing about channels or storage: it
/// only says how to apply a command, which commands change state, and how to
/// convert itself to and from a persisted [`Snapshot`](Aggregate::Snapshot).
///
/// # Async & Context
/// `handle` is async and receives a `Context`, injected into `run()` rather than
/// `new()`. The cart uses it for the notification sink.
#[async_trait]
pub trait Aggregate: Default + Send + Sync + 'static {
    /// A request to change or read the aggregate.
    type Command: Send + Sync + Debug;

    /// What `handle` returns for a command.
    type Reply: Send + Sync + Debug;

    /// The persisted form. Written as one JSON blob under a single key.
    type Snapshot: Serialize + DeserializeOwned + Send + Sync;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this aggregate.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Rebuilds the aggregate from a hydrated snapshot.
    fn restore(snapshot: Self::Snapshot) -> Self;

    /// Captures the full current state for persistence.
    fn snapshot(&self) -> Self::Snapshot;

    /// Whether `command` may change state. The actor persists after every
    /// successful command for which this returns `true`.
    fn mutates(command: &Self::Command) -> bool;

    /// Applies a command.
    async fn handle(
        &mut self,
        command: Self::Command,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;
}
