//! Chat-completion request types.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single message in the request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
}

/// Builds the system + user pair sent for one call.
pub fn conversation(system: &str, user: impl Into<String>) -> Vec<Message> {
    vec![Message::system(system), Message::user(user)]
}

/// Fills `input` into a map/reduce prompt.
///
/// Every occurrence of `placeholder` is replaced; a prompt without the
/// placeholder gets the input appended after a blank line.
pub fn fill_prompt(prompt: &str, placeholder: &str, input: &str) -> String {
    if !placeholder.is_empty() && prompt.contains(placeholder) {
        prompt.replace(placeholder, input)
    } else {
        format!("{prompt}\n\n{input}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = ChatCompletionRequest {
            model: "test-model".into(),
            messages: conversation("sysmsg: testshell", "hello"),
            stream: true,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "sysmsg: testshell"},
                    {"role": "user", "content": "hello"}
                ],
                "stream": true
            })
        );
    }

    #[test]
    fn test_fill_prompt_replaces_every_placeholder() {
        assert_eq!(
            fill_prompt("rename {input} to lowercase ({input})", "{input}", "A.TXT"),
            "rename A.TXT to lowercase (A.TXT)"
        );
    }

    #[test]
    fn test_fill_prompt_appends_without_placeholder() {
        assert_eq!(fill_prompt("summarize", "{input}", "log"), "summarize\n\nlog");
        assert_eq!(fill_prompt("x{}y", "", "in"), "x{}y\n\nin");
    }
}
