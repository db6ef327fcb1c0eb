//! File loading for talksh configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::Config;
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_INPUT_PLACEHOLDER, DEFAULT_MODEL, DEFAULT_SHELL,
    DEFAULT_SYSTEM_PROMPT, DEFAULT_TIMEOUT_SECS,
};

impl Config {
    /// Loads the config at `path`, first writing a commented default file
    /// there if nothing exists yet.
    pub(super) fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let default_toml = default_config_toml();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &default_toml)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            tracing::info!("created default config at {}", path.display());
            let config: Config = toml::from_str(&default_toml)
                .with_context(|| "Failed to parse default config".to_string())?;
            return Ok(config);
        }
        Self::load_file(path)
    }

    /// Loads the config at `path`. A missing file is an error.
    pub(super) fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {:?}", path))?;
        tracing::debug!("using config file {}", path.display());
        Ok(config)
    }
}

fn default_config_toml() -> String {
    format!(
        r#"[api]
base_url = "{DEFAULT_BASE_URL}"
# key = "{{env:OPENAI_API_KEY}}"
model = "{DEFAULT_MODEL}"
timeout = {DEFAULT_TIMEOUT_SECS:?}
stream = true

[assistant]
shell = "{DEFAULT_SHELL}"
system_prompt = "{DEFAULT_SYSTEM_PROMPT}"
input_placeholder = "{DEFAULT_INPUT_PLACEHOLDER}"
"#
    )
}
