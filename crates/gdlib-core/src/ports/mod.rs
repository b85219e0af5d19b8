//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces the progress component expects from the rest
//! of the application. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No toolkit types in any signature; widgets hide behind [`ProgressSlot`]
//! - The state store stays the single source of truth; consumers only ever
//!   hold derived snapshots and never write back through these traits
//! - Store and resolver ports are `Send + Sync` (they may be called through
//!   `Arc` handles); slot ports are UI-thread-only and deliberately not
//!   `Send`

mod folder_resolver;
mod progress_store;
mod slot;

pub use folder_resolver::{FolderResolver, NoopFolderResolver};
pub use progress_store::{ProgressStore, ProgressStoreError};
pub use slot::{ProgressSlot, SlotHost};
