//! HTTP client and reply decoding.

use anyhow::{Context, Result};
use std::io;
use std::time::Duration;

use super::request::{ChatCompletionRequest, Message};
use crate::assistant::{decode_message, AssistError, DecoderState, LineSplitter, StreamDecoder};
use crate::config::ApiConfig;
use crate::constants::CHAT_COMPLETIONS_PATH;
use crate::output::PreviewSink;

/// Which response framing to request from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// SSE `data:` deltas terminated by `[DONE]`, previewed live.
    Stream,
    /// One JSON body with the whole message.
    Message,
}

impl Framing {
    pub fn from_stream_flag(stream: bool) -> Self {
        if stream {
            Self::Stream
        } else {
            Self::Message
        }
    }
}

/// A configured chat-completions endpoint.
///
/// Holds its own copy of [`ApiConfig`]; nothing is looked up globally.
pub struct LlmClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl LlmClient {
    /// Builds the HTTP client. A timeout of zero (or less) disables it.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if config.timeout > 0.0 {
            let timeout = Duration::try_from_secs_f64(config.timeout)
                .with_context(|| format!("Invalid api.timeout: {}", config.timeout))?;
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    /// Full URL of the chat-completions endpoint.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    /// Sends `messages` and returns the assistant's full reply text.
    ///
    /// With [`Framing::Stream`] every delta is previewed through `sink`
    /// as it arrives; [`Framing::Message`] never touches the sink.
    pub async fn reply<S: PreviewSink>(
        &self,
        messages: &[Message],
        framing: Framing,
        sink: S,
    ) -> Result<String> {
        match framing {
            Framing::Stream => self.stream_reply(messages, sink).await,
            Framing::Message => self.message_reply(messages).await,
        }
    }

    async fn stream_reply<S: PreviewSink>(&self, messages: &[Message], sink: S) -> Result<String> {
        let mut response = self.send(messages, true).await?;
        let mut decoder = StreamDecoder::new(sink);
        let mut lines = LineSplitter::new();

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    return Err(decoder.fail(AssistError::StreamRead(io::Error::other(e))).into())
                }
            };
            for line in lines.push(&chunk).map_err(|e| decoder.fail(e))? {
                if decoder.feed_line(&line)? == DecoderState::Done {
                    return Ok(decoder.finish()?);
                }
            }
        }

        if let Some(line) = lines.finish().map_err(|e| decoder.fail(e))? {
            decoder.feed_line(&line)?;
        }
        Ok(decoder.finish()?)
    }

    async fn message_reply(&self, messages: &[Message]) -> Result<String> {
        let body = self
            .send(messages, false)
            .await?
            .text()
            .await
            .context("failed to read response body")?;
        Ok(decode_message(&body)?)
    }

    async fn send(&self, messages: &[Message], stream: bool) -> Result<reqwest::Response> {
        let body = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.to_vec(),
            stream,
        };
        let url = self.endpoint();
        tracing::debug!(%url, model = %body.model, stream, "sending chat completion request");

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = self.config.key.as_deref().filter(|k| !k.is_empty()) {
            request = request.bearer_auth(key);
        }
        let response = request.send().await.context("failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .context("failed to read response body")?;
            anyhow::bail!("failed to call API: status code {}: {:?}", status.as_u16(), text);
        }
        Ok(response)
    }
}
