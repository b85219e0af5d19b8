//! Bounded-list surface: the download manager window's stacked entries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gdlib_core::{ProgressSlot, ProgressSnapshot, ProgressStatus, SlotHost};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// One registered entry: the rendered slot plus the status it last showed.
///
/// The status is remembered so eviction can rank entries without re-reading
/// the store.
struct ListEntry {
    slot: Box<dyn ProgressSlot>,
    status: ProgressStatus,
}

/// Renders a capacity-limited, vertically ordered set of snapshots.
///
/// The registry maps task id to its slot; insertion order is display order
/// and stays stable under update-in-place. After every operation the
/// registry size is at most the capacity in effect for that operation.
pub struct BoundedListView {
    host: Box<dyn SlotHost>,
    entries: IndexMap<u64, ListEntry>,
    auto_scroll: bool,
    visible: bool,
}

impl BoundedListView {
    /// Create a hidden, empty view on the given host.
    pub fn new(host: Box<dyn SlotHost>) -> Self {
        Self {
            host,
            entries: IndexMap::new(),
            auto_scroll: true,
            visible: false,
        }
    }

    /// Render one snapshot, inserting, updating in place, or evicting as
    /// the capacity allows.
    ///
    /// When the registry is full, the lowest-priority entry makes room;
    /// when every registered entry outranks the incoming snapshot, the
    /// update is dropped rather than growing past `capacity`.
    pub fn update_progress(
        &mut self,
        snapshot: &ProgressSnapshot,
        folder: Option<&Path>,
        capacity: usize,
    ) {
        if capacity == 0 {
            warn!("ignoring list update with zero capacity");
            return;
        }

        let task_id = snapshot.task_id;
        if let Some(entry) = self.entries.get_mut(&task_id) {
            if entry.slot.is_alive() {
                entry.slot.render(snapshot, folder);
                entry.status = snapshot.status;
                self.shrink_to(capacity);
                self.auto_scroll();
                return;
            }
            // Widget destroyed out-of-band; drop the entry and re-insert below.
            debug!(task_id, "list slot widget is gone; recreating");
            self.entries.shift_remove(&task_id);
        }

        // The capacity may have shrunk since the last call.
        self.shrink_to(capacity);

        if self.entries.len() == capacity && !self.make_room(snapshot.status) {
            debug!(task_id, "list is full of higher-priority tasks; dropping update");
            return;
        }

        let mut slot = self.host.create_slot();
        slot.render(snapshot, folder);
        self.entries.insert(
            task_id,
            ListEntry {
                slot,
                status: snapshot.status,
            },
        );
        self.auto_scroll();
    }

    /// Re-render every registered slot from a fresh batch of snapshots.
    ///
    /// Batch entries without a slot are inserted through the normal
    /// capacity/eviction path; registered slots absent from the batch are
    /// left untouched (this is a refresh, not a resync).
    pub fn refresh_all(
        &mut self,
        snapshots: &[ProgressSnapshot],
        folders: &HashMap<String, PathBuf>,
        capacity: usize,
    ) {
        for snapshot in snapshots {
            let folder = folders.get(&snapshot.url).map(PathBuf::as_path);
            self.update_progress(snapshot, folder, capacity);
        }
    }

    /// Apply a new capacity immediately, evicting lowest-priority entries
    /// until the registry fits. Zero is rejected.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity == 0 {
            warn!("ignoring zero display capacity");
            return;
        }
        self.shrink_to(capacity);
    }

    /// Enable or disable scrolling to newly appended entries.
    pub const fn set_auto_scroll(&mut self, enabled: bool) {
        self.auto_scroll = enabled;
    }

    /// Whether auto-scroll is enabled.
    #[must_use]
    pub const fn auto_scroll_enabled(&self) -> bool {
        self.auto_scroll
    }

    /// Mark the window shown.
    pub const fn show(&mut self) {
        self.visible = true;
    }

    /// Tear down every slot and mark the window hidden.
    pub fn hide(&mut self) {
        self.clear();
        self.visible = false;
    }

    /// Tear down every slot, keeping the window state.
    pub fn clear(&mut self) {
        for (_, mut entry) in self.entries.drain(..) {
            entry.slot.destroy();
        }
    }

    /// Whether the window is currently shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a task currently has a slot.
    #[must_use]
    pub fn contains(&self, task_id: u64) -> bool {
        self.entries.contains_key(&task_id)
    }

    /// Registered task ids in display order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<u64> {
        self.entries.keys().copied().collect()
    }

    /// Evict lowest-priority entries until the registry fits `capacity`.
    fn shrink_to(&mut self, capacity: usize) {
        while self.entries.len() > capacity {
            let Some(victim) = self.lowest_priority_entry() else {
                return;
            };
            self.evict(victim);
        }
    }

    /// Evict one entry to admit a snapshot with the given status.
    ///
    /// Returns false when every registered entry strictly outranks the
    /// incoming status; the caller then drops the update.
    fn make_room(&mut self, incoming: ProgressStatus) -> bool {
        let Some(victim) = self.lowest_priority_entry() else {
            return false;
        };
        let victim_rank = self
            .entries
            .get(&victim)
            .map_or(0, |entry| eviction_rank(entry.status));
        if victim_rank > eviction_rank(incoming) {
            return false;
        }
        self.evict(victim);
        true
    }

    /// Entry judged least relevant: lowest rank, oldest-inserted among equals.
    fn lowest_priority_entry(&self) -> Option<u64> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(position, (_, entry))| (eviction_rank(entry.status), *position))
            .map(|(_, (task_id, _))| *task_id)
    }

    fn evict(&mut self, task_id: u64) {
        if let Some(mut entry) = self.entries.shift_remove(&task_id) {
            debug!(task_id, status = entry.status.as_str(), "evicting list entry");
            entry.slot.destroy();
        }
    }

    fn auto_scroll(&mut self) {
        if self.auto_scroll {
            self.host.scroll_to_end();
        }
    }
}

/// Eviction priority: finished work leaves first, running work last.
const fn eviction_rank(status: ProgressStatus) -> u8 {
    match status {
        ProgressStatus::Completed | ProgressStatus::Skipped | ProgressStatus::Error => 0,
        ProgressStatus::Paused => 1,
        ProgressStatus::Waiting => 2,
        ProgressStatus::Downloading => 3,
    }
}
