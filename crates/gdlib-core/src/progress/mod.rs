//! Progress data model.
//!
//! A [`ProgressSnapshot`] is an immutable, UI-safe view of one download
//! task's state at a point in time. Snapshots are built from the untyped
//! records the state store keeps; conversion is total, so a snapshot can be
//! produced from any input, including a missing record.

mod snapshot;
mod status;

pub use snapshot::{PageRange, ProgressSnapshot, TITLE_PLACEHOLDER};
pub use status::ProgressStatus;
