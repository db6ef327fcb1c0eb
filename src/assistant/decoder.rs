//! Streaming reply decoder.
//!
//! [`StreamDecoder`] is a push-based state machine: callers hand it one line
//! at a time, from a blocking reader ([`decode_reader`]) or from HTTP body
//! chunks split by [`LineSplitter`]. Each delta is appended to a
//! [`RollingBuffer`] and the redraw is written to a [`PreviewSink`] before
//! the next line is accepted.

use std::io::{self, BufRead};

use super::error::{AssistError, Result};
use super::event::{parse_event_line, StreamEvent};
use super::rolling::RollingBuffer;
use crate::constants::ERASE_LINE;
use crate::output::PreviewSink;

/// Lifecycle of one stream consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    Reading,
    /// The `[DONE]` sentinel was seen.
    Done,
    /// A read or decode error occurred; the partial reply was discarded.
    Failed,
}

/// Folds SSE lines into the full reply text while redrawing a live preview.
pub struct StreamDecoder<S: PreviewSink> {
    buffer: RollingBuffer,
    sink: S,
    state: DecoderState,
}

impl<S: PreviewSink> StreamDecoder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            buffer: RollingBuffer::new(),
            sink,
            state: DecoderState::Reading,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Processes one line (without its trailing `\n`; a trailing `\r` is
    /// stripped here).
    ///
    /// Lines arriving after `Done` or `Failed` are ignored.
    pub fn feed_line(&mut self, line: &str) -> Result<DecoderState> {
        if self.state != DecoderState::Reading {
            return Ok(self.state);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);

        match parse_event_line(line) {
            Ok(None) => {}
            Ok(Some(StreamEvent::Done)) => {
                tracing::debug!(chars = self.buffer.len(), "stream finished");
                self.sink.write_preview(ERASE_LINE);
                self.state = DecoderState::Done;
            }
            Ok(Some(StreamEvent::Delta(fragment))) => {
                tracing::trace!(fragment = %fragment, "delta");
                self.buffer.append(&fragment);
                let frame = self.buffer.render();
                self.sink.write_preview(&frame);
            }
            Err(e) => return Err(self.fail(e)),
        }
        Ok(self.state)
    }

    /// Moves to `Failed`, discards the partial reply, clears the preview
    /// line and hands the error back for propagation.
    pub fn fail(&mut self, err: AssistError) -> AssistError {
        tracing::debug!(chars = self.buffer.len(), "stream failed: {err}");
        if self.state == DecoderState::Reading {
            self.sink.write_preview(ERASE_LINE);
        }
        self.state = DecoderState::Failed;
        self.buffer = RollingBuffer::new();
        err
    }

    /// Returns the full accumulated reply.
    ///
    /// A stream that ended without the sentinel still yields what was
    /// received; the preview line is cleared in that case too.
    pub fn finish(mut self) -> Result<String> {
        match self.state {
            DecoderState::Done => Ok(self.buffer.text()),
            DecoderState::Reading => {
                tracing::warn!("event stream ended without {}", crate::constants::SSE_DONE_SENTINEL);
                self.sink.write_preview(ERASE_LINE);
                Ok(self.buffer.text())
            }
            DecoderState::Failed => Err(AssistError::StreamRead(io::Error::other(
                "stream decoding already failed",
            ))),
        }
    }
}

/// Splits arbitrary body chunks into complete UTF-8 lines.
///
/// Bytes are held until a `\n` arrives, so multi-byte characters split
/// across chunk boundaries are reassembled before decoding.
#[derive(Debug, Default)]
pub struct LineSplitter {
    pending: Vec<u8>,
    // Prefix of `pending` already known to hold no `\n`.
    scanned: usize,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chunk and returns every line it completed, without `\n`.
    ///
    /// Each byte is scanned once and completed lines are drained in a
    /// single pass, so a long line arriving in small chunks stays linear.
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<String>> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        let mut start = 0;
        let mut from = self.scanned;
        while let Some(offset) = self.pending[from..].iter().position(|&b| b == b'\n') {
            let end = from + offset;
            lines.push(into_utf8(self.pending[start..end].to_vec())?);
            start = end + 1;
            from = start;
        }
        self.pending.drain(..start);
        self.scanned = self.pending.len();
        Ok(lines)
    }

    /// Returns the trailing unterminated line, if any.
    pub fn finish(self) -> Result<Option<String>> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        into_utf8(self.pending).map(Some)
    }
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|e| AssistError::StreamRead(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Consumes a blocking line-oriented event stream to completion.
///
/// Stops at the sentinel without reading further; read errors abort
/// immediately with [`AssistError::StreamRead`].
pub fn decode_reader<R: BufRead, S: PreviewSink>(reader: R, sink: S) -> Result<String> {
    let mut decoder = StreamDecoder::new(sink);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return Err(decoder.fail(AssistError::StreamRead(e))),
        };
        if decoder.feed_line(&line)? == DecoderState::Done {
            break;
        }
    }
    decoder.finish()
}
