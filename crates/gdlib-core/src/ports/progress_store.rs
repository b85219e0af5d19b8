//! State store port definition.
//!
//! The store owns the authoritative raw progress data for every task and
//! emits change notifications as tasks advance. This component never trusts
//! a notification's payload: it re-fetches the current record through this
//! port, so bursts of coalesced or dropped notifications still converge on
//! the same rendered state.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::events::ProgressUpdated;

/// Errors surfaced by a progress store implementation.
///
/// Consumers treat any error as "record unavailable" and degrade to default
/// rendering; store errors never propagate past the progress component.
#[derive(Debug, Error)]
pub enum ProgressStoreError {
    /// Storage backend error (state manager, IPC, etc.).
    #[error("storage error: {0}")]
    Storage(String),

    /// The store's internal lock was poisoned by a crashed writer.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Port for reading raw progress records from the state store.
///
/// Records are untyped (`serde_json::Value`); converting them into typed
/// snapshots is the job of `ProgressSnapshot::from_raw`, which tolerates any
/// shape this port can return.
pub trait ProgressStore: Send + Sync {
    /// Fetch the current raw record for one task, if the store knows it.
    fn get_progress(&self, task_id: u64) -> Result<Option<Value>, ProgressStoreError>;

    /// Fetch all current raw records, keyed and ordered by task id.
    fn all_progress(&self) -> Result<BTreeMap<u64, Value>, ProgressStoreError>;

    /// Subscribe to change notifications, if the store supports them.
    ///
    /// Returns `None` when the store has no notification capability; the
    /// progress component then operates on explicit refresh calls only.
    /// Senders may live on any thread; the receiver must be drained on the
    /// UI thread.
    fn subscribe(&self) -> Option<UnboundedReceiver<ProgressUpdated>> {
        None
    }
}
