//! Command-line interface definition and dispatch for talksh.
//!
//! Uses [`clap`] for argument parsing with derive macros. Every request
//! subcommand runs the same pipeline: build the conversation, fetch the
//! reply through [`LlmClient`], then extract the first code block.

mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

use crate::assistant::{decode_reader, extract_code_block, AssistError};
use crate::config::Config;
use crate::constants::ERASE_LINE;
use crate::llm::{conversation, fill_prompt, Framing, LlmClient, Message};
use crate::output::{self, PreviewSink};
use prompt::PromptArgs;

/// Top-level CLI structure for talksh.
#[derive(Parser)]
#[command(
    name = "talksh",
    about = "talksh converts natural language to shell commands",
    long_about = "talksh helps you use the terminal without memorizing commands.\n\
Just describe your intent in natural language\n\
(e.g., \"find all .txt files modified today\")\n\
and talksh will suggest the corresponding shell command."
)]
pub struct Cli {
    /// Config file (default is ~/.config/talksh/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Request the whole reply at once instead of streaming it
    #[arg(long, global = true)]
    pub no_stream: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the talksh CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Suggest a shell one-liner for a request
    Suggest {
        /// What you want to do, in plain words
        request: Vec<String>,
    },
    /// Run a prompt on each input line
    ///
    /// One stdin line == one LLM call. Make upstream tools (cat, jq, etc.)
    /// emit exactly what you want per line.
    Map {
        #[command(flatten)]
        prompt: PromptArgs,
        /// Print the whole reply instead of its code block
        #[arg(long)]
        raw: bool,
    },
    /// Run a prompt once on the entire stdin payload
    Reduce {
        #[command(flatten)]
        prompt: PromptArgs,
        /// Print the whole reply instead of its code block
        #[arg(long)]
        raw: bool,
    },
    /// Decode a captured event stream from stdin and print its code block
    Replay {
        /// Print the whole reply instead of its code block
        #[arg(long)]
        raw: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// The user pressed Ctrl-C.
#[derive(Debug, thiserror::Error)]
#[error("interrupted")]
pub struct Interrupted;

/// Dispatches the parsed CLI command to its handler.
///
/// The whole command runs under a single Ctrl-C listener, so an interrupt
/// ends the process whether it lands mid-request or while waiting on stdin.
pub async fn run(cli: Cli) -> Result<()> {
    let (config, config_path) = Config::load(cli.config.as_deref())?;
    let framing = if cli.no_stream {
        Framing::Message
    } else {
        Framing::from_stream_flag(config.api.stream)
    };

    let result = interruptible(execute(cli.command, &config, &config_path, framing)).await;
    if let Err(err) = &result {
        if err.is::<Interrupted>() {
            // tokio's stdin reader thread cannot be cancelled and would
            // block runtime shutdown until the next line arrives.
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(130);
        }
    }
    result
}

async fn execute(
    command: Commands,
    config: &Config,
    config_path: &Path,
    framing: Framing,
) -> Result<()> {
    match command {
        Commands::Suggest { request } => {
            let request = request.join(" ");
            if request.trim().is_empty() {
                anyhow::bail!(
                    "No request provided. Usage: talksh suggest \"find all .txt files modified today\""
                );
            }
            let client = LlmClient::new(config.api_config())?;
            let messages = conversation(&config.assistant.system_message(), request);
            let code = ask(&client, &messages, framing, false).await?;
            println!("{code}");
            Ok(())
        }
        Commands::Map { prompt, raw } => {
            let prompt = prompt.resolve()?;
            let client = LlmClient::new(config.api_config())?;
            let system = config.assistant.system_message();
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await.context("read stdin")? {
                let user = fill_prompt(&prompt, &config.assistant.input_placeholder, &line);
                let messages = conversation(&system, user);
                let out = ask(&client, &messages, framing, raw)
                    .await
                    .context("call LLM")?;
                println!("{out}");
            }
            Ok(())
        }
        Commands::Reduce { prompt, raw } => {
            let prompt = prompt.resolve()?;
            let payload = read_stdin().await?;
            let client = LlmClient::new(config.api_config())?;
            let user = fill_prompt(&prompt, &config.assistant.input_placeholder, payload.trim());
            let messages = conversation(&config.assistant.system_message(), user);
            let out = ask(&client, &messages, framing, raw)
                .await
                .context("call LLM")?;
            println!("{out}");
            Ok(())
        }
        Commands::Replay { raw } => {
            let payload = read_stdin().await?;
            let reply = decode_reader(payload.as_bytes(), output::preview_sink())?;
            println!("{}", finish_reply(reply, raw)?);
            Ok(())
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    println!("{} {}", "Config path:".bold(), config_path.display());
                    println!();
                    let mut shown = config.clone();
                    if let Some(key) = shown.api.key.as_mut().filter(|k| !k.is_empty()) {
                        *key = "********".to_string();
                    }
                    println!("{}", toml::to_string_pretty(&shown)?);
                }
            }
            Ok(())
        }
    }
}

async fn read_stdin() -> Result<String> {
    let mut payload = String::new();
    tokio::io::stdin()
        .read_to_string(&mut payload)
        .await
        .context("read stdin")?;
    Ok(payload)
}

/// Fetches one reply and, unless `raw`, reduces it to its code block.
async fn ask(
    client: &LlmClient,
    messages: &[Message],
    framing: Framing,
    raw: bool,
) -> Result<String> {
    let reply = client
        .reply(messages, framing, output::preview_sink())
        .await?;
    finish_reply(reply, raw)
}

/// Extracts the code block, showing the whole reply on stderr when there is none.
fn finish_reply(reply: String, raw: bool) -> Result<String> {
    if raw {
        return Ok(reply);
    }
    extract_code_block(&reply).map_err(|err| {
        if let AssistError::NoCodeBlock { reply } = &err {
            eprintln!("{}", "assistant reply:".yellow().bold());
            eprintln!("{reply}");
        }
        anyhow::Error::from(err)
    })
}

/// Runs `fut` until it completes or the user presses Ctrl-C.
///
/// The listener is polled first so it is registered before `fut` starts.
/// Dropping an in-flight request closes the response stream.
async fn interruptible<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::select! {
        biased;
        _ = tokio::signal::ctrl_c() => {
            output::preview_sink().write_preview(ERASE_LINE);
            Err(Interrupted.into())
        }
        res = fut => res,
    }
}
