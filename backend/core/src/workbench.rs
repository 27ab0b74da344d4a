//! The submission controller.
//!
//! `Workbench` owns the UI state and drives it through [`UiState::apply`].
//! Requests are fire-and-forget: there is no in-flight guard and no
//! cancellation token, so two submits both run and the last one to resolve
//! decides what is displayed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace, warn};
use uuid::Uuid;

use crate::error::UserError;
use crate::event::SessionEvent;
use crate::state::{UiEvent, UiState};
use crate::traits::{ClipboardSink, OcrBackend};
use crate::types::{ExtractedText, SelectionSource};

/// How long the "copied" acknowledgment stays up.
pub const DEFAULT_COPY_ACK: Duration = Duration::from_millis(2000);

const EVENT_BUFFER: usize = 64;

#[derive(Clone)]
pub struct Workbench {
    state: Arc<Mutex<UiState>>,
    backend: Arc<dyn OcrBackend>,
    clipboard: Arc<dyn ClipboardSink>,
    copy_ack: Duration,
    events: broadcast::Sender<SessionEvent>,
}

impl Workbench {
    pub fn new(backend: Arc<dyn OcrBackend>, clipboard: Arc<dyn ClipboardSink>) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            state: Arc::new(Mutex::new(UiState::default())),
            backend,
            clipboard,
            copy_ack: DEFAULT_COPY_ACK,
            events,
        }
    }

    pub fn with_copy_ack(mut self, copy_ack: Duration) -> Self {
        self.copy_ack = copy_ack;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.lock().clone()
    }

    /// Store the first file of a picker or drop event. Returns `false` and
    /// leaves the state untouched when the event carried no file.
    pub fn select_file(&self, source: SelectionSource) -> bool {
        let kind = source.kind();
        let Some(file) = source.into_first() else {
            debug!(source = kind, "Selection event carried no file");
            return false;
        };

        info!(source = kind, file = %file.name, bytes = file.len(), "File selected");
        let event = SessionEvent::FileSelected {
            name: file.name.clone(),
            size: file.len(),
            source: kind.to_string(),
        };
        self.apply(UiEvent::FileSelected(file));
        self.emit(event);
        true
    }

    /// Drag-over only suppresses default handling.
    pub fn drag_over(&self) {
        trace!("Drag-over intercepted");
    }

    /// Upload the selected file and wait for the result.
    ///
    /// The returned error is the message shown to the user; the underlying
    /// cause is only logged.
    pub async fn submit(&self) -> Result<ExtractedText, UserError> {
        let selected = {
            let mut state = self.lock();
            let selected = state.selected.clone();
            state.apply(if selected.is_some() {
                UiEvent::SubmitStarted
            } else {
                UiEvent::SubmitRejected
            });
            selected
        };
        let Some(file) = selected else {
            warn!("Submit triggered with no file selected");
            self.emit(SessionEvent::SubmitRejected);
            return Err(UserError::NoFileSelected);
        };

        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            file = %file.name,
            bytes = file.len(),
            backend = self.backend.name(),
            "Submitting file for OCR"
        );
        self.emit(SessionEvent::SubmitStarted {
            request_id,
            file_name: file.name.clone(),
        });

        let mut pending = PendingRequest::new(self, request_id);
        let outcome = self.backend.recognize(&file).await;
        pending.settle();

        match outcome {
            Ok(text) => {
                info!(%request_id, fragments = text.tokens().len(), "OCR request succeeded");
                self.apply(UiEvent::SubmitSucceeded(text.clone()));
                self.emit(SessionEvent::SubmitSucceeded {
                    request_id,
                    fragments: text.tokens().len(),
                });
                Ok(text)
            }
            Err(err) => {
                error!(%request_id, status = ?err.status(), error = %err, "Error uploading file");
                self.apply(UiEvent::SubmitFailed);
                self.emit(SessionEvent::SubmitFailed {
                    request_id,
                    cause: err.to_string(),
                });
                Err(UserError::ProcessingFailed)
            }
        }
    }

    /// Run [`Workbench::submit`] as a detached task.
    pub fn spawn_submit(&self) -> JoinHandle<Result<ExtractedText, UserError>> {
        let this = self.clone();
        tokio::spawn(async move { this.submit().await })
    }

    /// Copy the displayed text and raise the acknowledgment flag for
    /// `copy_ack`. A later copy does not cancel an earlier reset timer.
    ///
    /// Returns `false` when there is no text to copy.
    pub fn copy(&self) -> bool {
        let Some(text) = self.lock().displayed_text() else {
            debug!("Nothing to copy");
            return false;
        };

        if let Err(err) = self.clipboard.write_text(&text) {
            warn!(error = %err, "Clipboard write failed");
        }
        self.apply(UiEvent::Copied);
        self.emit(SessionEvent::Copied {
            chars: text.chars().count(),
        });

        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.copy_ack).await;
            this.apply(UiEvent::CopyReset);
            this.emit(SessionEvent::CopyReset);
        });
        true
    }

    fn apply(&self, event: UiEvent) {
        self.lock().apply(event);
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> MutexGuard<'_, UiState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Clears `loading` and announces the abandonment if the submit future is
/// dropped before the request settles.
struct PendingRequest<'a> {
    workbench: &'a Workbench,
    request_id: Uuid,
    settled: bool,
}

impl<'a> PendingRequest<'a> {
    fn new(workbench: &'a Workbench, request_id: Uuid) -> Self {
        Self {
            workbench,
            request_id,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        if !self.settled {
            debug!(request_id = %self.request_id, "Submit dropped before the request settled");
            self.workbench.apply(UiEvent::SubmitAbandoned);
            self.workbench.emit(SessionEvent::SubmitAbandoned {
                request_id: self.request_id,
            });
        }
    }
}
