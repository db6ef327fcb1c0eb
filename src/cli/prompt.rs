//! Prompt selection for the `map` and `reduce` subcommands.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Where the instruction prompt comes from.
#[derive(Args, Debug, Default)]
pub struct PromptArgs {
    /// Raw prompt string
    #[arg(long)]
    pub prompt: Option<String>,
    /// Prompt file path
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,
}

impl PromptArgs {
    /// `--prompt` wins when non-empty; otherwise `--prompt-file` is read and trimmed.
    pub fn resolve(&self) -> Result<String> {
        if let Some(raw) = self.prompt.as_deref().filter(|p| !p.is_empty()) {
            return Ok(raw.to_string());
        }
        let Some(path) = &self.prompt_file else {
            anyhow::bail!("prompt required (use --prompt or --prompt-file)");
        };
        let data = fs::read_to_string(path)
            .with_context(|| format!("read prompt file {:?}", path))?;
        Ok(data.trim().to_string())
    }
}
