//! Rendering ports for progress surfaces.
//!
//! A *slot* is one rendered progress entry (title, status line, bar, folder
//! button); a *host* is the container a surface creates slots in. Toolkit
//! adapters implement both. The toolkit may destroy a widget out-of-band
//! (window closed); surfaces check [`ProgressSlot::is_alive`] and recreate
//! rather than fail.
//!
//! Slots and hosts are only ever touched from the UI thread, so neither
//! trait requires `Send`.

use std::path::Path;

use crate::progress::ProgressSnapshot;

/// One rendered progress entry on a surface.
pub trait ProgressSlot {
    /// Draw the snapshot into this slot, replacing previous content.
    ///
    /// `folder` enables the open-folder affordance when the gallery already
    /// has a resolved save location.
    fn render(&mut self, snapshot: &ProgressSnapshot, folder: Option<&Path>);

    /// Whether the underlying widget still exists.
    fn is_alive(&self) -> bool;

    /// Tear down the underlying widget. Safe to call on a dead slot.
    fn destroy(&mut self);
}

/// Container that slots are created in (a pane or a scrollable column).
pub trait SlotHost {
    /// Create a fresh, empty slot appended to this host.
    fn create_slot(&mut self) -> Box<dyn ProgressSlot>;

    /// Scroll the container so the newest slot is revealed.
    ///
    /// Default is a no-op for hosts without a scroll region (the main
    /// window's single pane).
    fn scroll_to_end(&mut self) {}
}
