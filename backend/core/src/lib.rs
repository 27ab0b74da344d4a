//! Core types and the upload/display state machine for textlift.
//!
//! The crate knows nothing about terminals, HTTP or the system clipboard; those
//! are plugged in through [`OcrBackend`] and [`ClipboardSink`].

pub mod error;
pub mod event;
pub mod state;
pub mod traits;
pub mod types;
pub mod workbench;

pub use error::{OcrError, UserError};
pub use event::SessionEvent;
pub use state::{UiEvent, UiState};
pub use traits::{ClipboardSink, OcrBackend};
pub use types::{ExtractedText, OcrResponse, SelectedFile, SelectionSource};
pub use workbench::{Workbench, DEFAULT_COPY_ACK};
