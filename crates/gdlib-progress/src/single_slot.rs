//! Single-slot surface: the one progress entry embedded in the main window.

use std::path::Path;

use gdlib_core::{ProgressSlot, ProgressSnapshot, SlotHost};
use tracing::debug;

/// Renders at most one snapshot, or nothing.
///
/// The slot is reused across updates (including updates for a different
/// task) so the pane does not flicker or resize; it is only recreated when
/// the toolkit destroyed the widget out-of-band.
pub struct SingleSlotView {
    host: Box<dyn SlotHost>,
    slot: Option<Box<dyn ProgressSlot>>,
    current_task: Option<u64>,
}

impl SingleSlotView {
    /// Create a hidden view on the given host.
    pub fn new(host: Box<dyn SlotHost>) -> Self {
        Self {
            host,
            slot: None,
            current_task: None,
        }
    }

    /// Show `snapshot`, replacing whatever was displayed before.
    ///
    /// Always transitions, whatever is currently shown; never fails.
    pub fn show(&mut self, snapshot: &ProgressSnapshot, folder: Option<&Path>) {
        let stale = self.slot.as_ref().is_some_and(|slot| !slot.is_alive());
        if stale {
            debug!(task_id = snapshot.task_id, "single slot widget is gone; recreating");
            self.slot = None;
        }
        let slot = self.slot.get_or_insert_with(|| self.host.create_slot());
        slot.render(snapshot, folder);
        self.current_task = Some(snapshot.task_id);
    }

    /// Clear the displayed content. Safe to call when already hidden.
    pub fn hide(&mut self) {
        if let Some(mut slot) = self.slot.take() {
            slot.destroy();
        }
        self.current_task = None;
    }

    /// Whether a live slot is currently displayed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.slot.as_ref().is_some_and(|slot| slot.is_alive())
    }

    /// Task currently shown, if any.
    #[must_use]
    pub const fn current_task(&self) -> Option<u64> {
        self.current_task
    }
}
