//! Log Redaction Layer
//!
//! Scrubs credentials that can ride along in endpoint URLs or error strings.
//! [`Redacting`] applies the same scrub to every formatted log line.

use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;
use tracing::Metadata;
use tracing_subscriber::fmt::MakeWriter;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").expect("valid regex"));
// Values stop at quotes and escapes so JSON and ANSI framing survive.
static QUERY_SECRET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)([?&](?:key|api_key|apikey|token|access_token|password|secret)=)[^&\s#"'\\\x1b]+"#)
        .expect("valid regex")
});
static USERINFO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"://[^/\s@:"\\\x1b]+:[^/\s@"\\\x1b]+@"#).expect("valid regex"));

pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = QUERY_SECRET_RE.replace_all(&redacted, "${1}[REDACTED]");
    USERINFO_RE.replace_all(&redacted, "://[REDACTED]@").into_owned()
}

/// Wraps a [`MakeWriter`] so each formatted event is scrubbed before it is
/// written.
#[derive(Debug, Clone)]
pub struct Redacting<M> {
    inner: M,
}

impl<M> Redacting<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for Redacting<M> {
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer())
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        RedactingWriter::new(self.inner.make_writer_for(meta))
    }
}

/// Buffers one event and writes it scrubbed on flush or drop.
pub struct RedactingWriter<W: Write> {
    inner: W,
    buf: Vec<u8>,
}

impl<W: Write> RedactingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, buf: Vec::new() }
    }

    fn drain(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let clean = redact_sensitive_data(&String::from_utf8_lossy(&self.buf));
        self.buf.clear();
        self.inner.write_all(clean.as_bytes())
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = self.drain();
    }
}
