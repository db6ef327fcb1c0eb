//! Reply pipeline for talksh.
//!
//! Consumes a chat-completion reply (streamed SSE deltas or a single-shot
//! message), accumulates it while redrawing a one-line rolling preview, and
//! pulls the first fenced code block out of the finished text.

mod decoder;
mod error;
mod event;
mod extract;
mod rolling;

pub use decoder::{decode_reader, DecoderState, LineSplitter, StreamDecoder};
pub use error::AssistError;
pub use event::decode_message;
pub use extract::extract_code_block;
