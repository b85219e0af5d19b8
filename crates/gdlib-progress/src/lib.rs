//! Progress display surfaces and the routing controller.
//!
//! Live download progress is rendered on one of two mutually exclusive
//! surfaces: a single slot embedded in the main window, or a bounded list
//! in the separate download manager window. [`ProgressRouter`] is the one
//! entry point: it is driven by state store change notifications, converts
//! raw records into typed snapshots, and dispatches to whichever surface is
//! active.
//!
//! # Concurrency Model
//!
//! Everything here runs on the UI thread and is synchronous bounded work.
//! The store may notify from a background download thread; those events
//! cross threads through a channel and are applied by
//! [`ProgressRouter::pump`], which the UI event loop calls on its own
//! thread. Surfaces are not thread-safe and are never touched elsewhere.

#![deny(unused_crate_dependencies)]

mod bounded_list;
mod controller;
mod single_slot;
#[cfg(test)]
mod test_support;

pub use bounded_list::BoundedListView;
pub use controller::{
    CandidateTask, DEFAULT_LIST_CAPACITY, DisplayMode, ProgressRouter, SelectionOrder,
    default_selection_order,
};
pub use single_slot::SingleSlotView;
