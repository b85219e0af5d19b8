//! Core domain types and port definitions for gdlib.
//!
//! This crate owns the progress data model (immutable snapshots derived from
//! the untyped records the state store keeps), the event types exchanged with
//! the store, and the port traits the UI-facing crates are wired against.
//! It contains no toolkit or storage implementation details.

#![deny(unused_crate_dependencies)]

pub mod events;
pub mod ports;
pub mod progress;
#[cfg(feature = "test-utils")]
pub mod testing;

// Re-export commonly used types for convenience
pub use events::{PROGRESS_UPDATED, ProgressUpdated};
pub use ports::{
    FolderResolver, NoopFolderResolver, ProgressSlot, ProgressStore, ProgressStoreError, SlotHost,
};
pub use progress::{PageRange, ProgressSnapshot, ProgressStatus, TITLE_PLACEHOLDER};
