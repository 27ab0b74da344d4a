use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Announced by the workbench after every state change, so views can redraw
/// and loggers can record the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    FileSelected {
        name: String,
        size: usize,
        source: String,
    },
    SubmitRejected,
    SubmitStarted {
        request_id: Uuid,
        file_name: String,
    },
    SubmitSucceeded {
        request_id: Uuid,
        fragments: usize,
    },
    SubmitFailed {
        request_id: Uuid,
        cause: String,
    },
    /// The submit was dropped before its request settled.
    SubmitAbandoned {
        request_id: Uuid,
    },
    Copied {
        chars: usize,
    },
    CopyReset,
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FileSelected { .. } => "file_selected",
            Self::SubmitRejected => "submit_rejected",
            Self::SubmitStarted { .. } => "submit_started",
            Self::SubmitSucceeded { .. } => "submit_succeeded",
            Self::SubmitFailed { .. } => "submit_failed",
            Self::SubmitAbandoned { .. } => "submit_abandoned",
            Self::Copied { .. } => "copied",
            Self::CopyReset => "copy_reset",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = SessionEvent::Copied { chars: 11 };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "copied");
        assert_eq!(json["chars"], 11);
    }

    #[test]
    fn kind_matches_serde_tag() {
        let event = SessionEvent::SubmitFailed {
            request_id: Uuid::new_v4(),
            cause: "HTTP error! status: 500".into(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(SessionEvent::CopyReset.to_string(), "copy_reset");
    }
}
