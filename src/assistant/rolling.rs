//! Append-only reply accumulator with a bounded live preview.

use crate::constants::{DIM_START, ERASE_LINE, PREVIEW_ELLIPSIS, PREVIEW_WIDTH, STYLE_RESET};

/// Accumulates reply fragments and exposes the most recent
/// [`PREVIEW_WIDTH`] code points for single-line redraw.
#[derive(Debug, Default)]
pub struct RollingBuffer {
    buf: Vec<char>,
}

impl RollingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment. Empty fragments and control characters are accepted as-is.
    pub fn append(&mut self, fragment: &str) {
        self.buf.extend(fragment.chars());
    }

    /// Number of code points accumulated so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The full accumulated text.
    pub fn text(&self) -> String {
        self.buf.iter().collect()
    }

    /// The last [`PREVIEW_WIDTH`] code points.
    ///
    /// When the buffer is longer than the window, the first slot is taken by
    /// [`PREVIEW_ELLIPSIS`] followed by the last `PREVIEW_WIDTH - 1` code points.
    pub fn window(&self) -> String {
        let len = self.buf.len();
        if len > PREVIEW_WIDTH {
            std::iter::once(PREVIEW_ELLIPSIS)
                .chain(self.buf[len - PREVIEW_WIDTH + 1..].iter().copied())
                .collect()
        } else {
            self.text()
        }
    }

    /// Erase-line, dim colour, the window as an escaped quoted literal, reset.
    ///
    /// The window is rendered with `Debug` formatting so embedded newlines
    /// and other control characters never reach the terminal raw.
    pub fn render(&self) -> String {
        format!("{ERASE_LINE}{DIM_START}{:?}{STYLE_RESET}", self.window())
    }
}
