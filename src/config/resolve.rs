//! Environment variable substitution and overrides.

use anyhow::{Context, Result};

use super::types::Config;
use crate::constants::ENV_PREFIX;

impl Config {
    /// Replace `{env:VAR}` patterns in every string field.
    pub(super) fn resolve_substitutions(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        let api = &mut self.api;
        api.base_url = resolve_str(&api.base_url, lookup);
        api.model = resolve_str(&api.model, lookup);
        if let Some(ref mut key) = api.key {
            *key = resolve_str(key, lookup);
        }
        let assistant = &mut self.assistant;
        assistant.shell = resolve_str(&assistant.shell, lookup);
        assistant.system_prompt = resolve_str(&assistant.system_prompt, lookup);
    }

    /// Apply `TALKSH_*` environment overrides. Empty values are ignored.
    pub(super) fn apply_env_overrides(
        &mut self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        let var = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}")).filter(|v| !v.is_empty())
        };
        if let Some(v) = var("API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = var("API_KEY") {
            self.api.key = Some(v);
        }
        if let Some(v) = var("API_MODEL") {
            self.api.model = v;
        }
        if let Some(v) = var("API_TIMEOUT") {
            self.api.timeout = v
                .parse()
                .with_context(|| format!("Invalid {ENV_PREFIX}_API_TIMEOUT: {v:?}"))?;
        }
        if let Some(v) = var("ASSISTANT_SHELL") {
            self.assistant.shell = v;
        }
        Ok(())
    }
}

/// Replace {env:VAR} with the variable's value (empty when unset).
fn resolve_str(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("{env:") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 5..start + end];
        let value = lookup(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        from = start + value.len();
    }
    result
}
