//! Centralized constants for talksh.
//!
//! All magic numbers, default strings, and wire-level literals live here
//! so they can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "talksh";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Prefix for environment variables that override config values.
pub const ENV_PREFIX: &str = "TALKSH";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "TALKSH_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// --- API defaults ---

/// Default OpenAI-compatible endpoint (local Ollama).
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemma3:12b-it-qat";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Path appended to the base URL for chat completions.
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

// --- Assistant defaults ---

/// Default shell the assistant writes one-liners for.
pub const DEFAULT_SHELL: &str = "zsh";

/// Placeholder in the system prompt template replaced by the shell name.
pub const SHELL_PLACEHOLDER: &str = "{shell}";

/// Default system prompt template.
pub const DEFAULT_SYSTEM_PROMPT: &str = "When you are asked to do something, first think step by step \
and then answer with a {shell} one-liner in the code block.";

/// Default placeholder in map/reduce prompts replaced by the input text.
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "{input}";

// --- Stream framing ---

/// Prefix of SSE lines that carry an event payload.
pub const SSE_DATA_PREFIX: &str = "data: ";

/// Payload marking the end of the event stream.
pub const SSE_DONE_SENTINEL: &str = "[DONE]";

/// Delimiter around fenced code blocks in assistant replies.
pub const CODE_FENCE: &str = "```";

// --- Live preview ---

/// Width of the rolling preview window, in code points.
pub const PREVIEW_WIDTH: usize = 30;

/// Marker prefixed to the preview when older text was cut off.
pub const PREVIEW_ELLIPSIS: char = '\u{2026}';

/// Carriage return followed by erase-to-end-of-line.
pub const ERASE_LINE: &str = "\r\x1b[K";

/// Bright black (grey) foreground.
pub const DIM_START: &str = "\x1b[90m";

/// Reset all attributes.
pub const STYLE_RESET: &str = "\x1b[0m";
