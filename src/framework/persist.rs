//! # Write-Behind Persistence
//!
//! Mutations complete as soon as the actor has applied them; the resulting
//! snapshot is handed to a [`WriteBehind`] task which writes it later.
//!
//! The task is the only writer for its key and drains its queue strictly in
//! order, one write at a time. A slow write therefore can never be overtaken by
//! a later one, and the last snapshot queued is the one left in storage.
//!
//! There is no retry: a failed write is logged and dropped, and the next
//! snapshot is written independently of it.

use crate::framework::error::FrameworkError;
use crate::framework::message::Response;
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Work queued for the persister.
#[derive(Debug)]
pub enum PersistRequest {
    /// A serialized snapshot to store under the persister's key.
    Write(String),
    /// Answered once every earlier request has been processed.
    Flush(Response<()>),
}

/// The task that owns all writes for one storage key.
pub struct WriteBehind {
    receiver: mpsc::UnboundedReceiver<PersistRequest>,
    storage: Arc<dyn Storage>,
    key: String,
}

/// Sending half of a [`WriteBehind`] queue.
///
/// The queue is unbounded so enqueueing never waits; the actor must not stall
/// behind slow storage.
#[derive(Clone)]
pub struct WriteBehindHandle {
    sender: mpsc::UnboundedSender<PersistRequest>,
}

impl WriteBehind {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> (Self, WriteBehindHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let persister = Self {
            receiver,
            storage,
            key: key.into(),
        };
        (persister, WriteBehindHandle { sender })
    }

    /// Drains the queue until every handle is dropped.
    pub async fn run(mut self) {
        info!(key = %self.key, "Persister started");
        let mut written = 0usize;
        let mut failed = 0usize;

        while let Some(request) = self.receiver.recv().await {
            match request {
                PersistRequest::Write(blob) => {
                    match self.storage.set_item(&self.key, &blob).await {
                        Ok(()) => {
                            written += 1;
                            debug!(key = %self.key, bytes = blob.len(), "Persisted");
                        }
                        Err(e) => {
                            failed += 1;
                            warn!(key = %self.key, error = %e, "Persist failed, snapshot dropped");
                        }
                    }
                }
                PersistRequest::Flush(respond_to) => {
                    debug!(key = %self.key, "Flush");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(key = %self.key, written, failed, "Persister shutdown");
    }
}

impl WriteBehindHandle {
    /// Queues a snapshot. Fails only if the persister task is gone.
    pub fn write(&self, blob: String) -> Result<(), FrameworkError> {
        self.sender
            .send(PersistRequest::Write(blob))
            .map_err(|_| FrameworkError::PersisterClosed)
    }

    /// Queues a flush barrier; `respond_to` is answered by the persister.
    pub fn flush(&self, respond_to: Response<()>) {
        if let Err(mpsc::error::SendError(PersistRequest::Flush(respond_to))) =
            self.sender.send(PersistRequest::Flush(respond_to))
        {
            let _ = respond_to.send(Err(FrameworkError::PersisterClosed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_writes_land_in_order() {
        let storage = MemoryStorage::new();
        storage.set_delay(Some(Duration::from_millis(5)));
        let (persister, handle) = WriteBehind::new(Arc::new(storage.clone()), "cart");
        let task = tokio::spawn(persister.run());

        for i in 0..5 {
            handle.write(format!("[{}]", i)).unwrap();
        }
        drop(handle);
        task.await.unwrap();

        assert_eq!(storage.write_count(), 5);
        assert_eq!(storage.snapshot("cart"), Some("[4]".to_string()));
    }

    #[tokio::test]
    async fn test_flush_waits_for_queued_writes() {
        let storage = MemoryStorage::new();
        storage.set_delay(Some(Duration::from_millis(10)));
        let (persister, handle) = WriteBehind::new(Arc::new(storage.clone()), "cart");
        tokio::spawn(persister.run());

        handle.write("[1]".to_string()).unwrap();
        handle.write("[2]".to_string()).unwrap();

        let (respond_to, response) = oneshot::channel();
        handle.flush(respond_to);
        response.await.unwrap().unwrap();

        assert_eq!(storage.snapshot("cart"), Some("[2]".to_string()));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_block_next() {
        let storage = MemoryStorage::new();
        let (persister, handle) = WriteBehind::new(Arc::new(storage.clone()), "cart");
        tokio::spawn(persister.run());

        storage.fail_writes(true);
        handle.write("[1]".to_string()).unwrap();
        let (respond_to, response) = oneshot::channel();
        handle.flush(respond_to);
        response.await.unwrap().unwrap();
        assert_eq!(storage.snapshot("cart"), None);

        storage.fail_writes(false);
        handle.write("[2]".to_string()).unwrap();
        let (respond_to, response) = oneshot::channel();
        handle.flush(respond_to);
        response.await.unwrap().unwrap();
        assert_eq!(storage.snapshot("cart"), Some("[2]".to_string()));
    }

    #[tokio::test]
    async fn test_closed_persister_rejects() {
        let (persister, handle) = WriteBehind::new(Arc::new(MemoryStorage::new()), "cart");
        drop(persister);

        assert!(matches!(
            handle.write("[]".to_string()),
            Err(FrameworkError::PersisterClosed)
        ));

        let (respond_to, response) = oneshot::channel();
        handle.flush(respond_to);
        assert!(matches!(
            response.await.unwrap(),
            Err(FrameworkError::PersisterClosed)
        ));
    }
}
