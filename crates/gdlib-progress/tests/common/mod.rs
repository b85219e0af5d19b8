//! Shared fixtures: recording slot/host fakes and a map-backed folder
//! resolver, wired against the in-memory store from `gdlib-core`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gdlib_core::{FolderResolver, ProgressSlot, ProgressSnapshot, SlotHost};

/// One captured render call.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub task_id: u64,
    pub title: String,
    pub status_line: String,
    pub percent: f64,
    pub folder: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct SlotState {
    pub frames: Vec<Frame>,
    pub alive: bool,
}

pub struct RecordingSlot {
    state: Rc<RefCell<SlotState>>,
}

impl ProgressSlot for RecordingSlot {
    fn render(&mut self, snapshot: &ProgressSnapshot, folder: Option<&Path>) {
        let mut state = self.state.borrow_mut();
        if !state.alive {
            return;
        }
        state.frames.push(Frame {
            task_id: snapshot.task_id,
            title: snapshot.display_title().to_owned(),
            status_line: snapshot.status_text(),
            percent: snapshot.progress_percent(),
            folder: folder.map(Path::to_path_buf),
        });
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

/// Host fake; clone it to keep an inspection handle while the router owns
/// a boxed copy.
#[derive(Clone, Debug, Default)]
pub struct RecordingHost {
    state: Rc<RefCell<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.state.borrow().slots.len()
    }

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

    /// Frames rendered into live slots, in slot creation order.
    pub fn live_frames(&self) -> Vec<Frame> {
        self.state
            .borrow()
            .slots
            .iter()
            .filter(|slot| slot.borrow().alive)
            .flat_map(|slot| slot.borrow().frames.clone())
            .collect()
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

/// Folder resolver backed by a fixed URL → folder map.
#[derive(Debug, Default)]
pub struct MapFolderResolver {
    folders: HashMap<String, PathBuf>,
}

impl MapFolderResolver {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            folders: entries
                .iter()
                .map(|(url, folder)| ((*url).to_owned(), PathBuf::from(folder)))
                .collect(),
        }
    }
}

impl FolderResolver for MapFolderResolver {
    fn resolve_folder(&self, url: &str) -> Option<PathBuf> {
        self.folders.get(url).cloned()
    }
}
