//! # Generic Aggregate Actor
//!
//! This module defines the `AggregateActor`, the task that owns one aggregate,
//! hydrates it from storage, and applies commands to it sequentially.

use crate::framework::aggregate::Aggregate;
use crate::framework::client::AggregateClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::{AggregateRequest, Lifecycle};
use crate::framework::persist::{WriteBehind, WriteBehindHandle};
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

/// The generic actor that owns a single aggregate.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state and the
/// receiver end of the channel. Every screen talks to it through a cloned
/// [`AggregateClient`], so there is exactly one writer and no locks.
///
/// # Startup
/// `run()` reads the persisted snapshot *before* taking the first message off
/// the channel. Commands sent while the actor is still `Loading` wait in the
/// channel and are applied on top of the hydrated state, so a slow load can
/// never overwrite them.
///
/// # Persistence
/// After each successful command for which [`Aggregate::mutates`] is true, the
/// full snapshot is serialized and queued on a [`WriteBehind`] task that `run()`
/// spawns and, on shutdown, waits for.
pub struct AggregateActor<A: Aggregate> {
    receiver: mpsc::Receiver<AggregateRequest<A>>,
    state: A,
    storage: Arc<dyn Storage>,
    key: String,
    lifecycle: watch::Sender<Lifecycle>,
}

impl<A: Aggregate> AggregateActor<A> {
    /// Creates a new `AggregateActor` and its associated `AggregateClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `storage` - Where the aggregate is hydrated from and persisted to.
    /// * `key` - The single storage key holding the aggregate's blob.
    pub fn new(
        buffer_size: usize,
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
    ) -> (Self, AggregateClient<A>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (lifecycle, lifecycle_rx) = watch::channel(Lifecycle::Loading);
        let actor = Self {
            receiver,
            state: A::default(),
            storage,
            key: key.into(),
            lifecycle,
        };
        let client = AggregateClient::new(sender, lifecycle_rx);
        (actor, client)
    }

    /// Runs the actor: hydrate, then process messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every [`Aggregate::handle`] call.
    pub async fn run(mut self, context: A::Context) {
        // Extract just the type name (e.g., "Cart" instead of "filament_cart::model::cart::Cart")
        let aggregate = std::any::type_name::<A>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(aggregate, key = %self.key, "Actor started");

        let (persister, persist) = WriteBehind::new(self.storage.clone(), self.key.clone());
        let persister_task = tokio::spawn(persister.run());

        self.hydrate(aggregate).await;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AggregateRequest::Execute {
                    command,
                    respond_to,
                } => {
                    debug!(aggregate, ?command, "Execute");
                    let mutates = A::mutates(&command);
                    match self.state.handle(command, &context).await {
                        Ok(reply) => {
                            if mutates {
                                self.persist(aggregate, &persist);
                            }
                            let _ = respond_to.send(Ok(reply));
                        }
                        Err(e) => {
                            warn!(aggregate, error = %e, "Command failed");
                            let _ =
                                respond_to.send(Err(FrameworkError::AggregateError(Box::new(e))));
                        }
                    }
                }
                AggregateRequest::Flush { respond_to } => {
                    debug!(aggregate, "Flush");
                    persist.flush(respond_to);
                }
            }
        }

        // Closing the queue lets the persister finish what is already queued.
        drop(persist);
        if let Err(e) = persister_task.await {
            error!(aggregate, error = %e, "Persister task failed");
        }
        info!(aggregate, "Shutdown");
    }

    /// Loads the persisted snapshot, if any, then marks the aggregate ready.
    ///
    /// Read failures and unreadable blobs are logged and leave the default
    /// (empty) state in place.
    async fn hydrate(&mut self, aggregate: &str) {
        match self.storage.get_item(&self.key).await {
            Ok(Some(blob)) => match serde_json::from_str::<A::Snapshot>(&blob) {
                Ok(snapshot) => {
                    self.state = A::restore(snapshot);
                    info!(aggregate, key = %self.key, "Hydrated");
                }
                Err(e) => {
                    warn!(aggregate, key = %self.key, error = %e, "Discarding unreadable snapshot");
                }
            },
            Ok(None) => debug!(aggregate, key = %self.key, "Nothing persisted"),
            Err(e) => warn!(aggregate, key = %self.key, error = %e, "Hydration failed"),
        }
        self.lifecycle.send_replace(Lifecycle::Ready);
    }

    fn persist(&self, aggregate: &str, persist: &WriteBehindHandle) {
        match serde_json::to_string(&self.state.snapshot()) {
            Ok(blob) => {
                if let Err(e) = persist.write(blob) {
                    warn!(aggregate, error = %e, "Snapshot dropped");
                }
            }
            Err(e) => warn!(aggregate, error = %e, "Snapshot serialization failed"),
        }
    }
}
