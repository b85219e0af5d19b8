//! Recording fakes for the slot/host ports, shared by the surface and
//! controller unit tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gdlib_core::{ProgressSlot, ProgressSnapshot, SlotHost};

/// One captured render call.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub task_id: u64,
    pub title: String,
    pub status_line: String,
    pub percent: f64,
    pub folder: Option<PathBuf>,
}

impl Frame {
    fn capture(snapshot: &ProgressSnapshot, folder: Option<&Path>) -> Self {
        Self {
            task_id: snapshot.task_id,
            title: snapshot.display_title().to_owned(),
            status_line: snapshot.status_text(),
            percent: snapshot.progress_percent(),
            folder: folder.map(Path::to_path_buf),
        }
    }
}

#[derive(Debug, Default)]
pub struct SlotState {
    pub frames: Vec<Frame>,
    pub alive: bool,
}

/// Slot fake that records every render into shared state.
pub struct RecordingSlot {
    state: Rc<RefCell<SlotState>>,
}

impl ProgressSlot for RecordingSlot {
    fn render(&mut self, snapshot: &ProgressSnapshot, folder: Option<&Path>) {
        let mut state = self.state.borrow_mut();
        if !state.alive {
            return;
        }
        state.frames.push(Frame::capture(snapshot, folder));
    }

    fn is_alive(&self) -> bool {
        self.state.borrow().alive
    }

    fn destroy(&mut self) {
        self.state.borrow_mut().alive = false;
    }
}

#[derive(Debug, Default)]
pub struct HostState {
    pub slots: Vec<Rc<RefCell<SlotState>>>,
    pub scrolls: usize,
}

/// Host fake; clone it to keep an inspection handle while the view owns a
/// boxed copy.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots ever created.
    pub fn created(&self) -> usize {
        self.state.borrow().slots.len()
    }

    /// Number of slots that are still alive.
    pub fn live(&self) -> usize {
        self.state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.borrow().alive)
            .count()
    }

    pub fn scrolls(&self) -> usize {
        self.state.borrow().scrolls
    }

    /// Shared state of the `index`-th created slot.
    pub fn slot(&self, index: usize) -> Rc<RefCell<SlotState>> {
        Rc::clone(&self.state.borrow().slots[index])
    }

    /// Most recent frame rendered into any slot.
    pub fn last_frame(&self) -> Option<Frame> {
        self.state
            .borrow()
            .slots
            .iter()
            .flat_map(|slot| slot.borrow().frames.clone())
            .last()
    }

    /// Simulate the toolkit destroying every widget out-of-band.
    pub fn kill_all(&self) {
        for slot in &self.state.borrow().slots {
            slot.borrow_mut().alive = false;
        }
    }
}

impl SlotHost for RecordingHost {
    fn create_slot(&mut self) -> Box<dyn ProgressSlot> {
        let state = Rc::new(RefCell::new(SlotState {
            frames: Vec::new(),
            alive: true,
        }));
        self.state.borrow_mut().slots.push(Rc::clone(&state));
        Box::new(RecordingSlot { state })
    }

    fn scroll_to_end(&mut self) {
        self.state.borrow_mut().scrolls += 1;
    }
}
