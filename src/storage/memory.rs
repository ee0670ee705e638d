use super::{Storage, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Inner {
    items: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
    delay: Mutex<Option<Duration>>,
}

/// In-process storage backed by a `HashMap`.
///
/// Clones share the same map, so a test can keep one handle to inspect what the
/// cart wrote through another. The `fail_*` switches make the next operations
/// return [`StorageError::Unavailable`].
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Inner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock_items().insert(key.into(), value.into());
        storage
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent read and write sleep for `delay` first.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self
            .inner
            .delay
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = delay;
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    /// Synchronous peek at a stored blob.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.lock_items().get(key).cloned()
    }

    fn lock_items(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.inner
            .items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn simulate_latency(&self) {
        let delay = *self
            .inner
            .delay
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.simulate_latency().await;
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("read of {} rejected", key)));
        }
        Ok(self.lock_items().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.simulate_latency().await;
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("write of {} rejected", key)));
        }
        self.lock_items().insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_items() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set_item("k", "v").await.unwrap();
        assert_eq!(other.get_item("k").await.unwrap(), Some("v".to_string()));
        assert_eq!(other.write_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let storage = MemoryStorage::with_item("k", "v");

        storage.fail_reads(true);
        assert!(matches!(
            storage.get_item("k").await,
            Err(StorageError::Unavailable(_))
        ));

        storage.fail_writes(true);
        assert!(storage.set_item("k", "w").await.is_err());
        assert_eq!(storage.snapshot("k"), Some("v".to_string()));
        assert_eq!(storage.write_count(), 0);
    }
}
