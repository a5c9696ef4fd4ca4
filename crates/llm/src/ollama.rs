//! Ollama backend — native NDJSON streaming API.
//!
//! Speaks both calling conventions: `/api/chat` takes a role-tagged
//! message list, `/api/generate` takes a flat prompt string. Either way
//! the response body is a stream of newline-delimited JSON chunks.

use crate::{Generate, Input, Message, Transport};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default Ollama endpoint.
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama provider over the native streaming API.
#[derive(Clone)]
pub struct Ollama {
    transport: Transport,
}

impl Ollama {
    /// Create a provider against the given base URL.
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            transport: Transport::no_auth(client, base_url),
        }
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

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// One NDJSON line of an `/api/chat` response.
#[derive(Deserialize)]
struct ChatChunk {
    message: Option<ChatDelta>,
    #[serde(default)]
    done: bool,
    error: Option<String>,
}

#[derive(Deserialize)]
struct ChatDelta {
    content: String,
}

/// One NDJSON line of an `/api/generate` response.
#[derive(Deserialize)]
struct GenerateChunk {
    response: Option<String>,
    #[serde(default)]
    done: bool,
    error: Option<String>,
}

/// Parse one `/api/chat` line into `(delta, done)`.
///
/// A malformed line or an in-band `error` field fails the whole stream.
fn parse_chat_line(line: &str) -> Result<(Option<String>, bool)> {
    let chunk: ChatChunk = serde_json::from_str(line)?;
    if let Some(error) = chunk.error {
        anyhow::bail!("ollama error: {error}");
    }
    let delta = chunk
        .message
        .map(|m| m.content)
        .filter(|c| !c.is_empty());
    Ok((delta, chunk.done))
}

/// Parse one `/api/generate` line into `(delta, done)`.
fn parse_generate_line(line: &str) -> Result<(Option<String>, bool)> {
    let chunk: GenerateChunk = serde_json::from_str(line)?;
    if let Some(error) = chunk.error {
        anyhow::bail!("ollama error: {error}");
    }
    let delta = chunk.response.filter(|c| !c.is_empty());
    Ok((delta, chunk.done))
}

impl Generate for Ollama {
    fn generate(
        &self,
        model: &str,
        input: Input,
    ) -> impl Stream<Item = Result<String>> + Send + 'static {
        let (request, path) = match &input {
            Input::Chat(messages) => (
                self.transport.post(
                    "/api/chat",
                    &ChatBody {
                        model,
                        messages,
                        stream: true,
                    },
                ),
                "/api/chat",
            ),
            Input::Completion(prompt) => (
                self.transport.post(
                    "/api/generate",
                    &GenerateBody {
                        model,
                        prompt,
                        stream: true,
                    },
                ),
                "/api/generate",
            ),
        };
        let completion = matches!(input, Input::Completion(_));

        try_stream! {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                Err(anyhow::anyhow!("ollama returned {status} from {path}"))?;
            }

            let mut stream = response.bytes_stream();
            let mut buf = String::new();
            while let Some(next) = stream.next().await {
                let bytes = next?;
                buf.push_str(&String::from_utf8_lossy(&bytes));
                while let Some(pos) = buf.find('\n') {
                    let line: String = buf.drain(..=pos).collect();
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    tracing::trace!("chunk: {line}");
                    let (delta, done) = if completion {
                        parse_generate_line(line)?
                    } else {
                        parse_chat_line(line)?
                    };
                    if let Some(delta) = delta {
                        yield delta;
                    }
                    if done {
                        return;
                    }
                }
            }

            // Trailing line without a newline terminator.
            let line = buf.trim().to_owned();
            if !line.is_empty() {
                let (delta, _) = if completion {
                    parse_generate_line(&line)?
                } else {
                    parse_chat_line(&line)?
                };
                if let Some(delta) = delta {
                    yield delta;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_line_yields_delta() {
        let line = r#"{"message":{"role":"assistant","content":"Hi"},"done":false}"#;
        let (delta, done) = parse_chat_line(line).unwrap();
        assert_eq!(delta.as_deref(), Some("Hi"));
        assert!(!done);
    }

    #[test]
    fn chat_line_final_chunk_is_done() {
        let line = r#"{"message":{"role":"assistant","content":""},"done":true}"#;
        let (delta, done) = parse_chat_line(line).unwrap();
        assert!(delta.is_none());
        assert!(done);
    }

    #[test]
    fn chat_line_error_field_fails() {
        let line = r#"{"error":"model not found"}"#;
        let err = parse_chat_line(line).unwrap_err();
        assert!(err.to_string().contains("model not found"));
    }

    #[test]
    fn chat_line_malformed_fails() {
        assert!(parse_chat_line("not json").is_err());
    }

    #[test]
    fn generate_line_yields_delta() {
        let line = r#"{"response":" there","done":false}"#;
        let (delta, done) = parse_generate_line(line).unwrap();
        assert_eq!(delta.as_deref(), Some(" there"));
        assert!(!done);
    }

    #[test]
    fn generate_line_empty_delta_is_filtered() {
        let line = r#"{"response":"","done":true}"#;
        let (delta, done) = parse_generate_line(line).unwrap();
        assert!(delta.is_none());
        assert!(done);
    }

    #[test]
    fn chat_body_shape() {
        let messages = vec![Message::user("hi")];
        let body = ChatBody {
            model: "llama3",
            messages: &messages,
            stream: true,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"model":"llama3","messages":[{"role":"user","content":"hi"}],"stream":true}"#
        );
    }

    #[test]
    fn generate_body_shape() {
        let body = GenerateBody {
            model: "llama3",
            prompt: "Human: hi\nAI:",
            stream: true,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"model":"llama3","prompt":"Human: hi\nAI:","stream":true}"#
        );
    }
}
