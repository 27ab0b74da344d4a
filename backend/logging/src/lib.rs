//! Telemetry and structured logging for textlift.
//!
//! Handles log redaction, the rolling NDJSON file, and session event records.
//! This is the diagnostic channel: failure causes that the UI collapses into
//! one message end up here.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{spawn_session_logger, SessionEventLogger, SessionLogEntry};
pub use logger::{init_logger, LogOutput};
pub use redact::{redact_sensitive_data, Redacting};
