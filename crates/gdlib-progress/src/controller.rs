//! Routing controller: the single entry point for progress updates.
//!
//! The router owns which surface is authoritative at any moment. Every
//! update re-fetches the raw record from the store, converts it totally
//! into a snapshot, and dispatches to the active surface. Nothing in here
//! is allowed to escape as a failure into the UI event loop: boundary
//! errors default, no-op, or log.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use gdlib_core::{
    FolderResolver, ProgressSnapshot, ProgressStatus, ProgressStore, ProgressUpdated, SlotHost,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, warn};

use crate::bounded_list::BoundedListView;
use crate::single_slot::SingleSlotView;

/// Default entry limit for the bounded-list surface.
pub const DEFAULT_LIST_CAPACITY: usize = 10;

/// Which surface is currently authoritative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// The single slot in the main window.
    #[default]
    Single,
    /// The bounded list in the download manager window.
    List,
}

/// A task competing for the single slot.
pub struct CandidateTask {
    /// Latest snapshot of the task.
    pub snapshot: ProgressSnapshot,
    /// Monotonic sequence number of the task's last update; higher means
    /// more recently updated. Zero for tasks never seen through an update.
    pub last_update_seq: u64,
}

/// Comparator choosing the "most relevant" task for the single slot.
///
/// The greater candidate wins. Kept explicit and swappable because the
/// relevance rule is a product decision, not an invariant.
pub type SelectionOrder = Box<dyn Fn(&CandidateTask, &CandidateTask) -> Ordering + Send>;

/// Default relevance order: downloading beats waiting beats everything
/// else; ties go to the most recently updated task, then the highest id.
#[must_use]
pub fn default_selection_order(a: &CandidateTask, b: &CandidateTask) -> Ordering {
    selection_rank(a.snapshot.status)
        .cmp(&selection_rank(b.snapshot.status))
        .then(a.last_update_seq.cmp(&b.last_update_seq))
        .then(a.snapshot.task_id.cmp(&b.snapshot.task_id))
}

const fn selection_rank(status: ProgressStatus) -> u8 {
    match status {
        ProgressStatus::Downloading => 2,
        ProgressStatus::Waiting => 1,
        _ => 0,
    }
}

/// Facade routing progress updates to the active display surface.
///
/// The two surfaces are mutually exclusive: toggling modes always hides
/// one and activates the other. The router registers for store change
/// notifications at construction; [`pump`](Self::pump) applies them on the
/// UI thread. A store without notification support degrades to explicit
/// [`update_progress`](Self::update_progress) calls.
pub struct ProgressRouter {
    store: Arc<dyn ProgressStore>,
    folders: Arc<dyn FolderResolver>,
    single: SingleSlotView,
    list: BoundedListView,
    mode: DisplayMode,
    capacity: usize,
    notifications: Option<UnboundedReceiver<ProgressUpdated>>,
    update_seq: u64,
    last_update: HashMap<u64, u64>,
    selection_order: SelectionOrder,
}

impl ProgressRouter {
    /// Create a router in single-slot mode and subscribe to the store.
    pub fn new(
        store: Arc<dyn ProgressStore>,
        folders: Arc<dyn FolderResolver>,
        single_host: Box<dyn SlotHost>,
        list_host: Box<dyn SlotHost>,
    ) -> Self {
        let notifications = store.subscribe();
        if notifications.is_none() {
            debug!("store has no change notifications; running on manual refresh only");
        }
        Self {
            store,
            folders,
            single: SingleSlotView::new(single_host),
            list: BoundedListView::new(list_host),
            mode: DisplayMode::Single,
            capacity: DEFAULT_LIST_CAPACITY,
            notifications,
            update_seq: 0,
            last_update: HashMap::new(),
            selection_order: Box::new(default_selection_order),
        }
    }

    /// Replace the single-slot relevance comparator.
    #[must_use]
    pub fn with_selection_order(
        mut self,
        order: impl Fn(&CandidateTask, &CandidateTask) -> Ordering + Send + 'static,
    ) -> Self {
        self.selection_order = Box::new(order);
        self
    }

    /// Drain pending change notifications, applying each in arrival order.
    ///
    /// This is the cross-thread handoff point: call it from the UI event
    /// loop and nowhere else. Returns the number of updates applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let event = match self.notifications.as_mut() {
                Some(rx) => rx.try_recv(),
                None => return applied,
            };
            match event {
                Ok(event) => match event.task_id {
                    Some(task_id) => {
                        self.update_progress(task_id);
                        applied += 1;
                    }
                    None => warn!("progress notification without a task id; ignoring"),
                },
                Err(TryRecvError::Empty) => return applied,
                Err(TryRecvError::Disconnected) => {
                    debug!("store notification channel closed");
                    self.notifications = None;
                    return applied;
                }
            }
        }
    }

    /// Refresh the display for one task (main API).
    ///
    /// Re-fetches the authoritative record, so repeated calls for an
    /// unchanged record converge on the same rendered state.
    pub fn update_progress(&mut self, task_id: u64) {
        let raw = match self.store.get_progress(task_id) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(task_id, %err, "progress fetch failed; rendering defaults");
                None
            }
        };
        if raw.is_none() {
            debug!(task_id, "no stored progress record");
        }
        let snapshot = ProgressSnapshot::from_raw(task_id, raw.as_ref());

        self.update_seq += 1;
        self.last_update.insert(task_id, self.update_seq);

        match self.mode {
            DisplayMode::List => {
                let folder = self.folders.resolve_folder(&snapshot.url);
                self.list
                    .update_progress(&snapshot, folder.as_deref(), self.capacity);
            }
            // The triggering task may not be the most relevant one; the
            // single slot always shows the recomputed winner.
            DisplayMode::Single => self.refresh_single_slot(Some(snapshot)),
        }
    }

    /// Switch to the bounded-list surface, seeding it with every known task.
    pub fn show_list_mode(&mut self) {
        self.single.hide();
        self.mode = DisplayMode::List;
        self.list.show();

        let all = self.fetch_all();
        let snapshots: Vec<ProgressSnapshot> = all
            .iter()
            .map(|(task_id, raw)| ProgressSnapshot::from_raw(*task_id, Some(raw)))
            .collect();
        let folders = self.resolve_folders(&snapshots);
        self.list.refresh_all(&snapshots, &folders, self.capacity);
    }

    /// Switch back to the single-slot surface.
    pub fn hide_list_mode(&mut self) {
        self.list.hide();
        self.mode = DisplayMode::Single;
        self.refresh_single_slot(None);
    }

    /// Whether the bounded-list surface is active.
    #[must_use]
    pub fn is_list_mode_active(&self) -> bool {
        self.mode == DisplayMode::List
    }

    /// Current display mode.
    #[must_use]
    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Set the bounded-list capacity. Zero is rejected without state change.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity == 0 {
            warn!("rejecting non-positive display capacity");
            return;
        }
        self.capacity = capacity;
        if self.mode == DisplayMode::List {
            self.list.set_capacity(capacity);
        }
    }

    /// Capacity currently in effect.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear both surfaces (e.g. when the URL list is reset).
    pub fn clear_all(&mut self) {
        self.single.hide();
        self.list.clear();
        self.last_update.clear();
    }

    /// Single-slot surface, for queries (current task, visibility).
    #[must_use]
    pub const fn single_slot(&self) -> &SingleSlotView {
        &self.single
    }

    /// Bounded-list surface, for queries (registered tasks, visibility).
    #[must_use]
    pub const fn list_view(&self) -> &BoundedListView {
        &self.list
    }

    /// Forward the auto-scroll toggle to the list surface.
    pub const fn set_auto_scroll(&mut self, enabled: bool) {
        self.list.set_auto_scroll(enabled);
    }

    /// Recompute the most relevant task and show it in the single slot.
    ///
    /// `triggering` is the snapshot of the task that caused the refresh, if
    /// any; a triggering task the store has no record of still competes with
    /// its default snapshot instead of being dropped.
    fn refresh_single_slot(&mut self, triggering: Option<ProgressSnapshot>) {
        let all = self.fetch_all();
        let mut candidates: Vec<CandidateTask> = all
            .iter()
            .map(|(task_id, raw)| CandidateTask {
                snapshot: ProgressSnapshot::from_raw(*task_id, Some(raw)),
                last_update_seq: self.last_update.get(task_id).copied().unwrap_or(0),
            })
            .collect();
        if let Some(snapshot) = triggering {
            if !all.contains_key(&snapshot.task_id) {
                let last_update_seq =
                    self.last_update.get(&snapshot.task_id).copied().unwrap_or(0);
                candidates.push(CandidateTask {
                    snapshot,
                    last_update_seq,
                });
            }
        }

        let winner = candidates
            .into_iter()
            .max_by(|a, b| (self.selection_order)(a, b));

        if let Some(candidate) = winner {
            let folder = self.folders.resolve_folder(&candidate.snapshot.url);
            self.single.show(&candidate.snapshot, folder.as_deref());
        }
    }

    /// Fetch every raw record, degrading to an empty batch on store errors.
    fn fetch_all(&self) -> BTreeMap<u64, Value> {
        match self.store.all_progress() {
            Ok(all) => all,
            Err(err) => {
                warn!(%err, "bulk progress fetch failed");
                BTreeMap::new()
            }
        }
    }

    /// Resolve save folders for a batch of snapshots, keyed by URL.
    fn resolve_folders(&self, snapshots: &[ProgressSnapshot]) -> HashMap<String, PathBuf> {
        snapshots
            .iter()
            .filter(|snapshot| !snapshot.url.is_empty())
            .filter_map(|snapshot| {
                self.folders
                    .resolve_folder(&snapshot.url)
                    .map(|folder| (snapshot.url.clone(), folder))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(task_id: u64, status: ProgressStatus, seq: u64) -> CandidateTask {
        CandidateTask {
            snapshot: ProgressSnapshot::new(task_id, "u").with_status(status),
            last_update_seq: seq,
        }
    }

    #[test]
    fn test_default_order_prefers_downloading_over_waiting() {
        let downloading = candidate(1, ProgressStatus::Downloading, 1);
        let waiting = candidate(2, ProgressStatus::Waiting, 99);
        assert_eq!(
            default_selection_order(&downloading, &waiting),
            Ordering::Greater
        );
    }

    #[test]
    fn test_default_order_prefers_waiting_over_terminal() {
        let waiting = candidate(1, ProgressStatus::Waiting, 1);
        let completed = candidate(2, ProgressStatus::Completed, 99);
        assert_eq!(default_selection_order(&waiting, &completed), Ordering::Greater);
    }

    #[test]
    fn test_default_order_breaks_ties_by_recency() {
        let older = candidate(9, ProgressStatus::Downloading, 1);
        let newer = candidate(3, ProgressStatus::Downloading, 2);
        assert_eq!(default_selection_order(&newer, &older), Ordering::Greater);
    }

    #[test]
    fn test_default_order_final_tiebreak_is_task_id() {
        let low = candidate(3, ProgressStatus::Downloading, 5);
        let high = candidate(7, ProgressStatus::Downloading, 5);
        assert_eq!(default_selection_order(&high, &low), Ordering::Greater);
    }
}
