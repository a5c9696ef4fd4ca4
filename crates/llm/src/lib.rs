//! Unified streaming LLM interface.
//!
//! This crate provides the shared types used by every backend: `Message`,
//! the `Input` calling conventions, and the `Generate` trait. Two remote
//! backends are included — `Ollama` (native NDJSON API, both conventions)
//! and `OpenAi` (OpenAI-compatible SSE chat completions) — plus a
//! scripted `Mock` for tests.

pub use message::{Message, Role};
pub use mock::Mock;
pub use ollama::{OLLAMA_BASE_URL, Ollama};
pub use openai::{OPENAI_API_URL, OpenAi};
pub use provider::{Generate, Input, Provider, ProviderKind, build_provider};
pub use reqwest::{self, Client};
pub use transport::Transport;

mod message;
mod mock;
mod ollama;
mod openai;
mod provider;
mod transport;
