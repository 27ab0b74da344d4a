//! Terminal event loop.
//!
//! Crossterm input is read on a plain thread and forwarded over a channel so
//! the loop can also wake on workbench events (request settled, copy
//! acknowledgement expired) and redraw.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tracing::{debug, info, warn};

use textlift_core::{SelectedFile, SelectionSource, Workbench};
use textlift_media::{list_entries, load_selection, AcceptFilter};

use crate::app::{Mode, TuiApp};
use crate::input::{handle_key_event, handle_paste, Action, Origin};
use crate::render::draw_ui;

/// Restores the terminal even when the loop bails with an error.
///
/// Mouse capture is on so drags over the window reach the loop; it also
/// takes over the terminal's own text selection while the UI is open.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableBracketedPaste, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub async fn run(workbench: Workbench, filter: AcceptFilter, start_dir: PathBuf) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.hide_cursor()?;

    let mut app = TuiApp::new(start_dir, filter);
    let mut events = spawn_input_reader();
    let mut session = workbench.subscribe();
    info!("TUI started");

    while !app.should_quit {
        draw(&mut terminal, &workbench, &mut app)?;

        tokio::select! {
            input = events.recv() => {
                let Some(input) = input else { break };
                if let Some(action) = dispatch_input(input, &workbench, &mut app) {
                    execute_action(action, &workbench, &mut app).await;
                }
            }
            session_event = session.recv() => match session_event {
                Ok(ev) => debug!(kind = ev.kind(), "Redraw on session event"),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }

    terminal.show_cursor()?;
    info!("TUI exited");
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    workbench: &Workbench,
    app: &mut TuiApp,
) -> Result<()> {
    let ui = workbench.snapshot();
    terminal.draw(|f| draw_ui(f, &ui, app))?;
    Ok(())
}

fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.blocking_send(ev).is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!(error = %e, "Terminal input failed");
                break;
            }
        }
    });
    rx
}

fn dispatch_input(input: Event, workbench: &Workbench, app: &mut TuiApp) -> Option<Action> {
    match input {
        Event::Key(key) => handle_key_event(key, app),
        Event::Paste(text) => handle_paste(&text, app),
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Drag(_)) => {
            workbench.drag_over();
            None
        }
        _ => None,
    }
}

async fn execute_action(action: Action, workbench: &Workbench, app: &mut TuiApp) {
    app.notice = None;
    match action {
        Action::Browse(dir) => match list_entries(&dir, &app.filter).await {
            Ok(entries) => {
                app.picker.set_listing(dir, entries);
                app.mode = Mode::Picker;
            }
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "Cannot list directory");
                app.notice = Some(format!("Cannot open {}", dir.display()));
            }
        },
        Action::Load { paths, origin } => {
            let wrap: fn(Vec<SelectedFile>) -> SelectionSource = match origin {
                Origin::Picker => SelectionSource::Picker,
                Origin::Drop => SelectionSource::Drop,
            };
            match load_selection(&paths, wrap).await {
                Ok(source) => {
                    workbench.select_file(source);
                }
                Err(e) => {
                    warn!(error = %e, "Cannot read selected file");
                    app.notice = Some(format!("{e:#}"));
                }
            }
        }
        Action::Submit => {
            // The trigger is disabled while a request is in flight
            if !workbench.snapshot().loading {
                workbench.spawn_submit();
            }
        }
        Action::Copy => {
            workbench.copy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use textlift_core::{ClipboardSink, ExtractedText, OcrBackend, OcrError};

    struct EchoBackend;

    #[async_trait]
    impl OcrBackend for EchoBackend {
        fn name(&self) -> &str {
            "echo"
        }

        async fn recognize(&self, file: &SelectedFile) -> Result<ExtractedText, OcrError> {
            Ok(ExtractedText::new(vec![file.name.clone()]))
        }
    }

    struct NullClipboard;

    impl ClipboardSink for NullClipboard {
        fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn workbench() -> Workbench {
        Workbench::new(Arc::new(EchoBackend), Arc::new(NullClipboard))
    }

    #[tokio::test]
    async fn drop_then_submit_extracts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.png");
        tokio::fs::write(&path, b"png").await.unwrap();

        let wb = workbench();
        let mut app = TuiApp::new(dir.path().to_path_buf(), AcceptFilter::default());
        let mut events = wb.subscribe();

        let action = handle_paste(&path.display().to_string(), &mut app).unwrap();
        execute_action(action, &wb, &mut app).await;
        assert_eq!(wb.snapshot().selected.unwrap().name, "note.png");

        execute_action(Action::Submit, &wb, &mut app).await;
        loop {
            if let textlift_core::SessionEvent::SubmitSucceeded { .. } = events.recv().await.unwrap() {
                break;
            }
        }
        assert_eq!(wb.snapshot().displayed_text().as_deref(), Some("note.png"));
    }

    #[test]
    fn mouse_drag_is_swallowed() {
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent};

        let wb = workbench();
        let mut app = TuiApp::new(PathBuf::from("/"), AcceptFilter::default());
        let before = wb.snapshot();
        let drag = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });

        assert!(dispatch_input(drag, &wb, &mut app).is_none());
        assert_eq!(wb.snapshot(), before);
        assert_eq!(app.mode, Mode::Main);
    }

    #[tokio::test]
    async fn unreadable_drop_sets_notice() {
        let wb = workbench();
        let mut app = TuiApp::new(PathBuf::from("/"), AcceptFilter::default());
        execute_action(
            Action::Load { paths: vec![PathBuf::from("/definitely/not/here.png")], origin: Origin::Drop },
            &wb,
            &mut app,
        )
        .await;
        assert!(app.notice.is_some());
        assert!(wb.snapshot().selected.is_none());
    }

    #[tokio::test]
    async fn submit_without_file_shows_message() {
        let wb = workbench();
        let mut app = TuiApp::new(PathBuf::from("/"), AcceptFilter::default());
        let mut events = wb.subscribe();
        execute_action(Action::Submit, &wb, &mut app).await;
        events.recv().await.unwrap();
        assert_eq!(wb.snapshot().error, Some(textlift_core::UserError::NoFileSelected));
    }
}
