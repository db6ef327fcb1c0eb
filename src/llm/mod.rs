//! Chat-completions client for talksh.
//!
//! Builds OpenAI-compatible requests from an explicit [`ApiConfig`] and
//! returns the assistant's full reply, decoding either an SSE stream (with a
//! live preview) or a single-shot JSON body.
//!
//! [`ApiConfig`]: crate::config::ApiConfig

mod client;
mod request;

pub use client::{Framing, LlmClient};
pub use request::{conversation, fill_prompt, Message};
