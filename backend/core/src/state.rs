//! Explicit UI state and its transitions.
//!
//! Every mutation of [`UiState`] goes through [`UiState::apply`]; nothing else
//! touches the fields.

use crate::error::UserError;
use crate::types::{ExtractedText, SelectedFile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub selected: Option<SelectedFile>,
    pub text: ExtractedText,
    pub loading: bool,
    pub error: Option<UserError>,
    pub copied: bool,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A picker or drop yielded a file.
    FileSelected(SelectedFile),
    /// Submit was triggered with nothing selected.
    SubmitRejected,
    SubmitStarted,
    SubmitSucceeded(ExtractedText),
    SubmitFailed,
    /// The submit future was dropped before the request settled.
    SubmitAbandoned,
    Copied,
    CopyReset,
}

impl UiState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::FileSelected(file) => {
                self.selected = Some(file);
                self.error = None;
            }
            UiEvent::SubmitRejected => {
                self.error = Some(UserError::NoFileSelected);
            }
            UiEvent::SubmitStarted => {
                self.loading = true;
                self.error = None;
            }
            UiEvent::SubmitSucceeded(text) => {
                self.text = text;
                self.loading = false;
            }
            UiEvent::SubmitFailed => {
                self.error = Some(UserError::ProcessingFailed);
                self.loading = false;
            }
            UiEvent::SubmitAbandoned => self.loading = false,
            UiEvent::Copied => self.copied = true,
            UiEvent::CopyReset => self.copied = false,
        }
    }

    /// Text shown in the result panel, `None` while there is nothing to show.
    pub fn displayed_text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.joined())
    }

    /// Whether the submit trigger is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && self.selected.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Processing..."
        } else {
            "Upload & Extract Text"
        }
    }

    pub fn copy_label(&self) -> &'static str {
        if self.copied {
            "copied"
        } else {
            "copy"
        }
    }
}
