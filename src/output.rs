//! Live preview sink abstraction for talksh.
//!
//! Defines the [`PreviewSink`] trait that decouples the reply decoder from
//! the terminal. [`StdoutSink`] writes raw control sequences to stdout;
//! [`NullSink`] discards them when stdout is not a terminal.

use std::io::{self, IsTerminal, Write};

/// Receives raw redraw payloads produced while a reply streams in.
pub trait PreviewSink {
    /// Write a preview payload verbatim. Failures are not fatal to decoding.
    fn write_preview(&mut self, payload: &str);
}

/// Writes previews straight to stdout with an explicit flush so each
/// redraw appears as soon as its delta arrives.
pub struct StdoutSink;

impl PreviewSink for StdoutSink {
    fn write_preview(&mut self, payload: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = out.write_all(payload.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!("preview write failed: {e}");
        }
    }
}

/// Discards every preview.
pub struct NullSink;

impl PreviewSink for NullSink {
    fn write_preview(&mut self, _payload: &str) {}
}

/// Picks [`StdoutSink`] when stdout is a terminal, [`NullSink`] otherwise,
/// so piped output never carries cursor control sequences.
pub fn preview_sink() -> Box<dyn PreviewSink> {
    if io::stdout().is_terminal() {
        Box::new(StdoutSink)
    } else {
        Box::new(NullSink)
    }
}

impl<S: PreviewSink + ?Sized> PreviewSink for &mut S {
    fn write_preview(&mut self, payload: &str) {
        (**self).write_preview(payload);
    }
}

impl<S: PreviewSink + ?Sized> PreviewSink for Box<S> {
    fn write_preview(&mut self, payload: &str) {
        (**self).write_preview(payload);
    }
}

/// Records every payload; used to assert on redraw side effects in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub writes: Vec<String>,
}

#[cfg(test)]
impl PreviewSink for RecordingSink {
    fn write_preview(&mut self, payload: &str) {
        self.writes.push(payload.to_string());
    }
}
