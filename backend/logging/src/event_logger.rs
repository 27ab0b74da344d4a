//! Session Event Logger
//!
//! Records the workbench lifecycle (selection, submission, copy) to the
//! `session_events` target, one NDJSON entry per event.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use textlift_core::SessionEvent;

use crate::redact::redact_sensitive_data;

#[derive(Debug, Clone, Serialize)]
pub struct SessionLogEntry {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

pub struct SessionEventLogger;

impl SessionEventLogger {
    /// Redact free-form strings, then emit the entry through tracing.
    pub fn log_event(session_id: &str, mut event: SessionEvent) -> SessionLogEntry {
        match &mut event {
            SessionEvent::SubmitFailed { cause, .. } => {
                *cause = redact_sensitive_data(cause);
            }
            SessionEvent::FileSelected { name, .. } | SessionEvent::SubmitStarted { file_name: name, .. } => {
                *name = redact_sensitive_data(name);
            }
            _ => {}
        }

        let entry = SessionLogEntry {
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();
        info!(target: "session_events", session_id, kind = entry.event.kind(), entry = %json, "Session event");
        entry
    }
}

/// Drain a workbench event stream into the session log until the sender is
/// gone.
pub fn spawn_session_logger(
    mut rx: broadcast::Receiver<SessionEvent>,
    session_id: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    SessionEventLogger::log_event(&session_id, event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "session_events", skipped, "Session logger fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn failure_cause_is_redacted() {
        let entry = SessionEventLogger::log_event(
            "s1",
            SessionEvent::SubmitFailed {
                request_id: Uuid::new_v4(),
                cause: "error sending request for url (http://h/ocr?token=s3cr3t)".into(),
            },
        );
        match entry.event {
            SessionEvent::SubmitFailed { cause, .. } => assert!(!cause.contains("s3cr3t")),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn entry_serializes_flat_event() {
        let entry = SessionEventLogger::log_event("s2", SessionEvent::Copied { chars: 5 });
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["session_id"], "s2");
        assert_eq!(json["event"]["type"], "copied");
    }

    #[tokio::test]
    async fn logger_task_ends_when_sender_drops() {
        let (tx, rx) = broadcast::channel(4);
        let handle = spawn_session_logger(rx, "s3".into());
        tx.send(SessionEvent::CopyReset).unwrap();
        drop(tx);
        handle.await.unwrap();
    }
}
