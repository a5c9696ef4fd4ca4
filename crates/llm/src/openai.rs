//! OpenAI-compatible backend — SSE chat completions streaming.
//!
//! Covers the OpenAI API and any server speaking the same protocol.
//! Chat convention only: a completion input is sent as a single user
//! message, since the native completions endpoint is legacy.

use crate::{Generate, Input, Message, Transport};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default OpenAI chat completions endpoint.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI-compatible provider.
#[derive(Clone)]
pub struct OpenAi {
    transport: Transport,
}

impl OpenAi {
    /// Create a provider against the official OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Ok(Self {
            transport: Transport::bearer(client, key, OPENAI_API_URL)?,
        })
    }

    /// Create a provider against a custom OpenAI-compatible endpoint.
    ///
    /// An empty key skips the Authorization header (local servers).
    pub fn custom(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let transport = if key.is_empty() {
            Transport::no_auth(client, endpoint)
        } else {
            Transport::bearer(client, key, endpoint)?
        };
        Ok(Self { transport })
    }

    /// Get the underlying transport.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

/// One SSE data payload of a streaming chat completion.
#[derive(Deserialize)]
struct StreamChunk {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    delta: Delta,
}

#[derive(Deserialize, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

impl StreamChunk {
    /// Get the content delta of the first choice.
    fn delta(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.delta.content)
            .filter(|c| !c.is_empty())
    }
}

/// Extract the `data:` payload from one SSE block.
fn sse_data(block: &str) -> Option<&str> {
    let mut data = None;
    for line in block.lines() {
        if let Some(d) = line.strip_prefix("data:") {
            data = Some(d.trim());
        }
    }
    data
}

impl Generate for OpenAi {
    fn generate(
        &self,
        model: &str,
        input: Input,
    ) -> impl Stream<Item = Result<String>> + Send + 'static {
        let messages = match input {
            Input::Chat(messages) => messages,
            Input::Completion(prompt) => vec![Message::user(prompt)],
        };
        let request = self.transport.post(
            "",
            &ChatBody {
                model,
                messages: &messages,
                stream: true,
            },
        );

        try_stream! {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                Err(anyhow::anyhow!("backend returned {status}"))?;
            }

            let mut stream = response.bytes_stream();
            let mut buf = String::new();
            while let Some(next) = stream.next().await {
                let bytes = next?;
                buf.push_str(&String::from_utf8_lossy(&bytes));
                while let Some(pos) = buf.find("\n\n") {
                    let block: String = buf.drain(..pos + 2).collect();
                    let Some(data) = sse_data(&block) else {
                        continue;
                    };
                    if data == "[DONE]" {
                        return;
                    }
                    tracing::trace!("chunk: {data}");
                    let chunk: StreamChunk = serde_json::from_str(data)?;
                    if let Some(delta) = chunk.delta() {
                        yield delta;
                    }
                }
            }
        }
    }
}
