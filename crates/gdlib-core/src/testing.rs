//! In-memory store for tests and headless integrations.
//!
//! Enabled with the `test-utils` feature so downstream crates can exercise
//! the progress component without a real state manager.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::events::ProgressUpdated;
use crate::ports::{ProgressStore, ProgressStoreError};

/// Thread-safe in-memory [`ProgressStore`].
///
/// Writers call [`set_raw`](Self::set_raw) from any thread; every live
/// subscriber receives a [`ProgressUpdated`] notification per write.
#[derive(Debug, Default)]
pub struct MemoryProgressStore {
    records: Mutex<BTreeMap<u64, Value>>,
    subscribers: Mutex<Vec<UnboundedSender<ProgressUpdated>>>,
    subscribable: bool,
}

impl MemoryProgressStore {
    /// Create an empty store with notification support.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            subscribers: Mutex::new(Vec::new()),
            subscribable: true,
        }
    }

    /// Create a store that does not support subscriptions.
    ///
    /// Models the degraded manual-refresh-only mode of operation.
    #[must_use]
    pub fn no_subscribe() -> Self {
        Self {
            subscribable: false,
            ..Self::new()
        }
    }

    /// Insert or replace the raw record for a task and notify subscribers.
    pub fn set_raw(&self, task_id: u64, raw: Value) {
        lock(&self.records).insert(task_id, raw);
        self.notify(ProgressUpdated::new(task_id));
    }

    /// Remove a task's record without notifying.
    pub fn remove(&self, task_id: u64) {
        lock(&self.records).remove(&task_id);
    }

    /// Emit a notification without touching any record.
    ///
    /// Lets tests model spurious or malformed notifications.
    pub fn notify(&self, event: ProgressUpdated) {
        lock(&self.subscribers).retain(|tx| tx.send(event).is_ok());
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get_progress(&self, task_id: u64) -> Result<Option<Value>, ProgressStoreError> {
        Ok(lock(&self.records).get(&task_id).cloned())
    }

    fn all_progress(&self) -> Result<BTreeMap<u64, Value>, ProgressStoreError> {
        Ok(lock(&self.records).clone())
    }

    fn subscribe(&self) -> Option<UnboundedReceiver<ProgressUpdated>> {
        if !self.subscribable {
            return None;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        Some(rx)
    }
}

/// Lock a mutex, recovering from poisoning (tests may panic mid-write).
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
