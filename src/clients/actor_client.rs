use crate::framework::{Aggregate, AggregateClient, FrameworkError, Lifecycle};
use async_trait::async_trait;

/// Trait for aggregate-specific clients to inherit the operations every
/// aggregate has: lifecycle queries and the persistence barrier.
#[async_trait]
pub trait ActorClient<A: Aggregate>: Send + Sync {
    /// The aggregate-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic AggregateClient.
    fn inner(&self) -> &AggregateClient<A>;

    /// Map framework errors to the specific error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// `true` until the persisted state has been read (or failed to read).
    fn is_loading(&self) -> bool {
        self.inner().lifecycle() == Lifecycle::Loading
    }

    /// Wait until hydration has finished.
    #[tracing::instrument(skip(self))]
    async fn wait_ready(&self) -> Result<(), Self::Error> {
        self.inner().wait_ready().await.map_err(Self::map_error)
    }

    /// Wait until every mutation made so far has been written to storage.
    ///
    /// Mutations never wait for their own write; call this where durability
    /// matters, e.g. before the process exits.
    #[tracing::instrument(skip(self))]
    async fn flush(&self) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().flush().await.map_err(Self::map_error)
    }
}
