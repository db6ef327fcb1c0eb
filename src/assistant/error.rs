//! Error types for the reply pipeline.

use thiserror::Error;

/// Result type alias for reply pipeline operations.
pub type Result<T> = std::result::Result<T, AssistError>;

/// Failures while decoding an assistant reply or extracting code from it.
///
/// Every variant carries enough context (the offending payload or reply text)
/// to diagnose the failure without re-running the request.
#[derive(Error, Debug)]
pub enum AssistError {
    /// Reading the response body failed mid-stream.
    #[error("failed to read response body: {0}")]
    StreamRead(#[source] std::io::Error),

    /// An event payload was not valid JSON of the expected shape.
    #[error("failed to decode event payload {payload:?}: {source}")]
    MalformedEvent {
        /// Raw payload as received.
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// An event payload had an empty `choices` array.
    #[error("event payload has no choices: {payload:?}")]
    EmptyChoices {
        /// Raw payload as received.
        payload: String,
    },

    /// The server answered with an error object instead of a reply.
    #[error("llm error: {message}")]
    Api {
        /// Message reported by the server.
        message: String,
    },

    /// The completed reply did not contain a fenced code block.
    #[error("assistant did not produce a code block")]
    NoCodeBlock {
        /// The full reply, shown to the user for diagnosis.
        reply: String,
    },
}
