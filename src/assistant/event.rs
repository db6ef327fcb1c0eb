//! Wire shapes of chat-completion replies.
//!
//! Two framings are understood:
//!
//! - streaming: SSE lines `data: {"choices":[{"delta":{"content":"..."}}]}`
//!   terminated by `data: [DONE]`
//! - single-shot: one `{"choices":[{"message":{"content":"..."}}]}` body

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::error::{AssistError, Result};
use crate::constants::{SSE_DATA_PREFIX, SSE_DONE_SENTINEL};

/// One parsed unit of the event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental text fragment (possibly empty).
    Delta(String),
    /// The end-of-stream sentinel.
    Done,
}

/// A reply body is either a provider error object or a `choices` array;
/// anything else is malformed.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<C> {
    Failure { error: ApiErrorBody },
    Reply { choices: Vec<C> },
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    // Role-only deltas send `null` or omit the field.
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct MessageChoice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Parses a single SSE line.
///
/// Returns `Ok(None)` for lines that do not carry a `data: ` payload
/// (blank separators, comments, `event:` lines). The sentinel is recognised
/// before any JSON parsing is attempted.
pub fn parse_event_line(line: &str) -> Result<Option<StreamEvent>> {
    let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
        return Ok(None);
    };
    if payload == SSE_DONE_SENTINEL {
        return Ok(Some(StreamEvent::Done));
    }

    let choice: StreamChoice = first_choice(payload)?;
    Ok(Some(StreamEvent::Delta(
        choice.delta.content.unwrap_or_default(),
    )))
}

/// Decodes a complete non-streaming response body into the reply text.
pub fn decode_message(body: &str) -> Result<String> {
    let choice: MessageChoice = first_choice(body)?;
    Ok(choice.message.content.unwrap_or_default())
}

/// Shared by both framings: an `error` object wins, then `choices[0]`
/// is taken with an explicit bounds check.
fn first_choice<C: DeserializeOwned>(payload: &str) -> Result<C> {
    let parsed: Payload<C> =
        serde_json::from_str(payload).map_err(|source| AssistError::MalformedEvent {
            payload: payload.to_string(),
            source,
        })?;
    match parsed {
        Payload::Failure { error } => Err(AssistError::Api {
            message: error.message,
        }),
        Payload::Reply { choices } => {
            choices
                .into_iter()
                .next()
                .ok_or_else(|| AssistError::EmptyChoices {
                    payload: payload.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_data_lines_are_ignored() {
        for line in ["", ": keep-alive", "event: message", "id: 7", "data:no-space"] {
            assert_eq!(parse_event_line(line).unwrap(), None, "line {line:?}");
        }
    }

    #[test]
    fn test_done_sentinel_skips_json() {
        assert_eq!(
            parse_event_line("data: [DONE]").unwrap(),
            Some(StreamEvent::Done)
        );
    }

    #[test]
    fn test_delta_content() {
        let ev = parse_event_line(r#"data: {"choices":[{"delta":{"content":"ls"}}]}"#).unwrap();
        assert_eq!(ev, Some(StreamEvent::Delta("ls".into())));
    }

    #[test]
    fn test_role_only_delta_is_empty_fragment() {
        let ev = parse_event_line(
            r#"data: {"choices":[{"index":0,"delta":{"role":"assistant","content":null}}]}"#,
        )
        .unwrap();
        assert_eq!(ev, Some(StreamEvent::Delta(String::new())));
    }

    #[test]
    fn test_empty_choices_is_typed_error() {
        let err = parse_event_line(r#"data: {"choices":[]}"#).unwrap_err();
        match err {
            AssistError::EmptyChoices { payload } => assert_eq!(payload, r#"{"choices":[]}"#),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload_keeps_payload() {
        let err = parse_event_line("data: {not json").unwrap_err();
        assert!(matches!(
            err,
            AssistError::MalformedEvent { ref payload, .. } if payload == "{not json"
        ));
    }

    #[test]
    fn test_payload_without_choices_is_malformed() {
        let err = parse_event_line("data: {}").unwrap_err();
        assert!(matches!(
            err,
            AssistError::MalformedEvent { ref payload, .. } if payload == "{}"
        ));
        let err = parse_event_line(r#"data: {"id":"chatcmpl-1","object":"chunk"}"#).unwrap_err();
        assert!(matches!(err, AssistError::MalformedEvent { .. }));
    }

    #[test]
    fn test_stream_error_object_is_api_error() {
        let err = parse_event_line(r#"data: {"error":{"message":"rate limited"}}"#).unwrap_err();
        assert!(matches!(err, AssistError::Api { ref message } if message == "rate limited"));
    }

    #[test]
    fn test_null_error_with_choices_is_delta() {
        let ev = parse_event_line(r#"data: {"error":null,"choices":[{"delta":{"content":"x"}}]}"#)
            .unwrap();
        assert_eq!(ev, Some(StreamEvent::Delta("x".into())));
    }

    #[test]
    fn test_decode_message_without_choices_is_malformed() {
        let err = decode_message("{}").unwrap_err();
        assert!(matches!(err, AssistError::MalformedEvent { .. }));
    }

    #[test]
    fn test_decode_message() {
        let text =
            decode_message(r#"{"choices":[{"message":{"role":"assistant","content":"```\npwd\n```"}}]}"#)
                .unwrap();
        assert_eq!(text, "```\npwd\n```");
    }

    #[test]
    fn test_decode_message_error_object() {
        let err = decode_message(r#"{"error":{"message":"model not found"}}"#).unwrap_err();
        assert!(matches!(err, AssistError::Api { ref message } if message == "model not found"));
    }

    #[test]
    fn test_decode_message_no_choices() {
        let err = decode_message(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, AssistError::EmptyChoices { .. }));
    }
}
