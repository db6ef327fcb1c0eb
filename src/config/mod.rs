//! Configuration for talksh.
//!
//! Settings are stored as TOML at the platform's XDG config path
//! (e.g. `~/.config/talksh/config.toml` on Linux), may reference environment
//! variables as `{env:VAR}`, and can be overridden with `TALKSH_*` variables.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::{ApiConfig, AssistantConfig, Config};

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::constants::SHELL_PLACEHOLDER;

impl Config {
    /// Load config from `explicit` when given, otherwise from the default
    /// path (created with defaults if absent). Returns the config and the
    /// path it came from.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let lookup = |name: &str| std::env::var(name).ok();
        let (mut config, path) = match explicit {
            Some(path) => (Self::load_file(path)?, path.to_path_buf()),
            None => {
                let path = Self::config_path()?;
                (Self::load_or_create(&path)?, path)
            }
        };
        config.resolve_substitutions(&lookup);
        config.apply_env_overrides(&lookup)?;
        Ok((config, path))
    }

    /// Owned endpoint settings for the HTTP client.
    pub fn api_config(&self) -> ApiConfig {
        self.api.clone()
    }
}

impl AssistantConfig {
    /// The system prompt with the shell name filled in.
    pub fn system_message(&self) -> String {
        self.system_prompt.replace(SHELL_PLACEHOLDER, &self.shell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_message_fills_shell() {
        let assistant = AssistantConfig {
            shell: "bash".into(),
            ..AssistantConfig::default()
        };
        let msg = assistant.system_message();
        assert!(msg.contains("a bash one-liner"), "got {msg}");
        assert!(!msg.contains(SHELL_PLACEHOLDER));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talksh.toml");
        std::fs::write(&path, "[assistant]\nshell = \"nu\"\n").unwrap();
        let (config, used) = Config::load(Some(&path)).unwrap();
        assert_eq!(used, path);
        assert_eq!(config.api_config().model, crate::constants::DEFAULT_MODEL);
    }
}
