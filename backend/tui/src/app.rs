//! TUI App State
//!
//! View-only state: which screen is up, the picker listing, the footer
//! notice. Everything about the upload lives in the workbench.

use std::path::{Path, PathBuf};

use ratatui::widgets::ListState;
use textlift_media::{AcceptFilter, PickerEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Main,
    Picker,
}

pub struct PickerState {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub list_state: ListState,
}

impl PickerState {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            entries: Vec::new(),
            list_state: ListState::default(),
        }
    }

    pub fn set_listing(&mut self, dir: PathBuf, entries: Vec<PickerEntry>) {
        self.dir = dir;
        self.entries = entries;
        self.list_state.select((!self.entries.is_empty()).then_some(0));
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() as isize - 1;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        self.list_state.select(Some((current + delta).clamp(0, last) as usize));
    }

    pub fn parent(&self) -> Option<&Path> {
        self.dir.parent()
    }
}

pub struct TuiApp {
    pub mode: Mode,
    pub picker: PickerState,
    pub filter: AcceptFilter,
    /// Footer line for things that are not workbench errors, e.g. an
    /// unreadable path.
    pub notice: Option<String>,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(start_dir: PathBuf, filter: AcceptFilter) -> Self {
        Self {
            mode: Mode::Main,
            picker: PickerState::new(start_dir),
            filter,
            notice: None,
            should_quit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PickerEntry {
        PickerEntry {
            path: PathBuf::from("/tmp").join(name),
            name: name.into(),
            is_dir: false,
        }
    }

    #[test]
    fn listing_selects_first_entry() {
        let mut picker = PickerState::new(PathBuf::from("/"));
        picker.set_listing(PathBuf::from("/tmp"), vec![entry("a.png"), entry("b.png")]);
        assert_eq!(picker.selected().unwrap().name, "a.png");

        picker.set_listing(PathBuf::from("/empty"), vec![]);
        assert!(picker.selected().is_none());
    }

    #[test]
    fn movement_is_clamped() {
        let mut picker = PickerState::new(PathBuf::from("/tmp"));
        picker.set_listing(PathBuf::from("/tmp"), vec![entry("a.png"), entry("b.png")]);
        picker.move_by(5);
        assert_eq!(picker.selected().unwrap().name, "b.png");
        picker.move_by(-9);
        assert_eq!(picker.selected().unwrap().name, "a.png");
    }
}
