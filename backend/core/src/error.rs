use thiserror::Error;

/// The only errors a user ever sees. Everything else is collapsed into
/// [`UserError::ProcessingFailed`] and goes to the log.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Please select a file first.")]
    NoFileSelected,

    #[error("Failed to process the file. Please try again.")]
    ProcessingFailed,
}

/// Why an OCR request failed. Diagnostic only.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response body: {0}")]
    Decode(String),
}

impl OcrError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_fixed() {
        assert_eq!(UserError::NoFileSelected.to_string(), "Please select a file first.");
        assert_eq!(
            UserError::ProcessingFailed.to_string(),
            "Failed to process the file. Please try again."
        );
    }

    #[test]
    fn http_error_exposes_status() {
        let err = OcrError::Http { status: 500, body: "boom".into() };
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(OcrError::Decode("eof".into()).status(), None);
    }
}
