//! Change notification events emitted by the state store.
//!
//! # Wire Format
//!
//! Stores that bridge notifications over a wire serialize the payload as
//! `{ "task_id": 3 }` under the event name [`PROGRESS_UPDATED`]. A payload
//! without a usable task id still arrives (as `task_id: null`) so the
//! consumer can log and drop it instead of silently losing the event.

use serde::{Deserialize, Serialize};

/// Event name for progress change notifications.
pub const PROGRESS_UPDATED: &str = "progress-updated";

/// Notification that a task's raw progress record changed.
///
/// Carries only the task id; consumers re-fetch the authoritative record
/// from the store rather than trusting any payload data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdated {
    /// The affected task, or `None` for a malformed notification.
    pub task_id: Option<u64>,
}

impl ProgressUpdated {
    /// Create a notification for one task.
    #[must_use]
    pub const fn new(task_id: u64) -> Self {
        Self {
            task_id: Some(task_id),
        }
    }

    /// Create a malformed notification (no task id).
    ///
    /// Exists so store adapters can forward broken wire payloads for the
    /// consumer to count and log.
    #[must_use]
    pub const fn malformed() -> Self {
        Self { task_id: None }
    }

    /// Get the event name for wire protocols.
    #[must_use]
    pub const fn event_name(&self) -> &'static str {
        PROGRESS_UPDATED
    }
}
