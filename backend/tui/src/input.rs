//! Keyboard Input Handler
//!
//! Turns crossterm key and paste events into `Action`s. Picker navigation
//! is handled in place; anything that touches disk or the workbench is
//! returned for the runner to execute.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use textlift_media::parse_dropped_paths;

use crate::app::{Mode, TuiApp};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Picker,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List a directory into the picker and show it.
    Browse(PathBuf),
    Load { paths: Vec<PathBuf>, origin: Origin },
    Submit,
    Copy,
}

pub fn handle_key_event(key: KeyEvent, app: &mut TuiApp) -> Option<Action> {
    // Windows reports releases too
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return None;
    }

    match app.mode {
        Mode::Main => handle_main_key(key, app),
        Mode::Picker => handle_picker_key(key, app),
    }
}

fn handle_main_key(key: KeyEvent, app: &mut TuiApp) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('o') | KeyCode::Char('b') => Some(Action::Browse(app.picker.dir.clone())),
        KeyCode::Enter | KeyCode::Char('u') => Some(Action::Submit),
        KeyCode::Char('c') => Some(Action::Copy),
        _ => None,
    }
}

fn handle_picker_key(key: KeyEvent, app: &mut TuiApp) -> Option<Action> {
    let picker = &mut app.picker;
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.mode = Mode::Main;
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            picker.move_by(-1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            picker.move_by(1);
            None
        }
        KeyCode::PageUp => {
            picker.move_by(-10);
            None
        }
        KeyCode::PageDown => {
            picker.move_by(10);
            None
        }
        KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
            picker.parent().map(|p| Action::Browse(p.to_path_buf()))
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            let entry = picker.selected()?.clone();
            if entry.is_dir {
                Some(Action::Browse(entry.path))
            } else {
                app.mode = Mode::Main;
                Some(Action::Load {
                    paths: vec![entry.path],
                    origin: Origin::Picker,
                })
            }
        }
        _ => None,
    }
}

/// A bracketed paste is how a terminal delivers a file drop.
pub fn handle_paste(text: &str, app: &mut TuiApp) -> Option<Action> {
    let paths = parse_dropped_paths(text);
    if paths.is_empty() {
        return None;
    }
    app.mode = Mode::Main;
    Some(Action::Load {
        paths,
        origin: Origin::Drop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use textlift_media::{AcceptFilter, PickerEntry};

    fn app() -> TuiApp {
        TuiApp::new(PathBuf::from("/home/u"), AcceptFilter::default())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn main_keys_map_to_actions() {
        let mut app = app();
        assert_eq!(handle_key_event(press(KeyCode::Enter), &mut app), Some(Action::Submit));
        assert_eq!(handle_key_event(press(KeyCode::Char('u')), &mut app), Some(Action::Submit));
        assert_eq!(handle_key_event(press(KeyCode::Char('c')), &mut app), Some(Action::Copy));
        assert_eq!(
            handle_key_event(press(KeyCode::Char('o')), &mut app),
            Some(Action::Browse(PathBuf::from("/home/u")))
        );
        assert!(!app.should_quit);
        handle_key_event(press(KeyCode::Char('q')), &mut app);
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_picker() {
        let mut app = app();
        app.mode = Mode::Picker;
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(key, &mut app), None);
        assert!(app.should_quit);
    }

    #[test]
    fn esc_closes_picker_before_quitting() {
        let mut app = app();
        app.mode = Mode::Picker;
        handle_key_event(press(KeyCode::Esc), &mut app);
        assert_eq!(app.mode, Mode::Main);
        assert!(!app.should_quit);
    }

    #[test]
    fn picker_enter_descends_or_loads() {
        let mut app = app();
        app.mode = Mode::Picker;
        app.picker.set_listing(
            PathBuf::from("/home/u"),
            vec![
                PickerEntry { path: "/home/u/scans".into(), name: "scans".into(), is_dir: true },
                PickerEntry { path: "/home/u/a.png".into(), name: "a.png".into(), is_dir: false },
            ],
        );

        assert_eq!(
            handle_key_event(press(KeyCode::Enter), &mut app),
            Some(Action::Browse(PathBuf::from("/home/u/scans")))
        );
        assert_eq!(app.mode, Mode::Picker);

        handle_key_event(press(KeyCode::Down), &mut app);
        assert_eq!(
            handle_key_event(press(KeyCode::Enter), &mut app),
            Some(Action::Load { paths: vec![PathBuf::from("/home/u/a.png")], origin: Origin::Picker })
        );
        assert_eq!(app.mode, Mode::Main);
    }

    #[test]
    fn picker_backspace_goes_up() {
        let mut app = app();
        app.mode = Mode::Picker;
        assert_eq!(
            handle_key_event(press(KeyCode::Backspace), &mut app),
            Some(Action::Browse(PathBuf::from("/home")))
        );
    }

    #[test]
    fn paste_becomes_drop() {
        let mut app = app();
        app.mode = Mode::Picker;
        let action = handle_paste("'/tmp/scan one.png' /tmp/b.pdf", &mut app);
        assert_eq!(
            action,
            Some(Action::Load {
                paths: vec![PathBuf::from("/tmp/scan one.png"), PathBuf::from("/tmp/b.pdf")],
                origin: Origin::Drop,
            })
        );
        assert_eq!(app.mode, Mode::Main);
        assert_eq!(handle_paste("   ", &mut app), None);
    }

    #[test]
    fn release_events_ignored() {
        let mut app = app();
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_key_event(key, &mut app), None);
    }
}
