//! Provider abstractions for the unified LLM interface

use crate::{Client, Message, OLLAMA_BASE_URL, Ollama, OpenAi};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

/// Model input, one variant per backend calling convention.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A role-tagged message list for chat endpoints.
    Chat(Vec<Message>),
    /// A single flattened prompt string for completion endpoints.
    Completion(String),
}

/// A trait for streaming text-generation backends.
pub trait Generate: Clone + Send + Sync + 'static {
    /// Send an input to the backend and stream incremental text fragments.
    ///
    /// The stream is finite and not restartable; exhaustion is the only
    /// completion signal. Fragments are opaque non-empty chunks whose
    /// boundaries are an artifact of upstream network chunking. A failed
    /// call yields one terminal error; fragments already yielded stand.
    fn generate(&self, model: &str, input: Input)
    -> impl Stream<Item = Result<String>> + Send + 'static;
}

/// Supported backend kinds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Ollama native API (default, no key required).
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions API.
    OpenAi,
}

/// Unified backend enum.
///
/// Callers construct the appropriate variant via [`build_provider`] and
/// stay monomorphized on `Provider`.
#[derive(Clone)]
pub enum Provider {
    /// Ollama native API.
    Ollama(Ollama),
    /// OpenAI-compatible API.
    OpenAi(OpenAi),
}

/// Construct a [`Provider`] from a backend kind and a shared HTTP client.
pub fn build_provider(
    kind: ProviderKind,
    client: Client,
    base_url: Option<&str>,
    api_key: &str,
) -> Result<Provider> {
    let provider = match kind {
        ProviderKind::Ollama => {
            Provider::Ollama(Ollama::new(client, base_url.unwrap_or(OLLAMA_BASE_URL)))
        }
        ProviderKind::OpenAi => match base_url {
            Some(url) => Provider::OpenAi(OpenAi::custom(client, api_key, url)?),
            None => Provider::OpenAi(OpenAi::api(client, api_key)?),
        },
    };
    Ok(provider)
}

impl Generate for Provider {
    fn generate(
        &self,
        model: &str,
        input: Input,
    ) -> impl Stream<Item = Result<String>> + Send + 'static {
        let this = self.clone();
        let model = model.to_owned();
        try_stream! {
            match this {
                Provider::Ollama(p) => {
                    let mut stream = std::pin::pin!(p.generate(&model, input));
                    while let Some(fragment) = stream.next().await {
                        yield fragment?;
                    }
                }
                Provider::OpenAi(p) => {
                    let mut stream = std::pin::pin!(p.generate(&model, input));
                    while let Some(fragment) = stream.next().await {
                        yield fragment?;
                    }
                }
            }
        }
    }
}
