//! Struct definitions and serde defaults for talksh configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_INPUT_PLACEHOLDER, DEFAULT_MODEL, DEFAULT_SHELL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TIMEOUT_SECS,
};

/// Root configuration for talksh, deserialized from `config.toml`.
///
/// Every field has a serde default so a partial (or empty) file is valid.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Chat-completions endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Prompt shaping settings.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Connection details for the OpenAI-compatible endpoint.
///
/// Passed by value into the HTTP client at call time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Base URL, `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token. Omitted from the request when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Whole-request timeout in seconds; fractions allowed.
    #[serde(default = "default_timeout")]
    pub timeout: f64,
    /// Request an SSE stream (`true`) or a single-shot reply (`false`).
    #[serde(default = "default_stream")]
    pub stream: bool,
}

/// How the assistant is instructed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Shell the one-liners are written for.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// System prompt template; `{shell}` is replaced with [`AssistantConfig::shell`].
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Placeholder in map/reduce prompts replaced by the input text.
    #[serde(default = "default_input_placeholder")]
    pub input_placeholder: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_stream() -> bool {
    true
}

fn default_shell() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_input_placeholder() -> String {
    DEFAULT_INPUT_PLACEHOLDER.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: None,
            model: default_model(),
            timeout: default_timeout(),
            stream: default_stream(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            system_prompt: default_system_prompt(),
            input_placeholder: default_input_placeholder(),
        }
    }
}
