//! A dialogue participant.
//!
//! An [`Agent`] owns one participant's identity, system instructions,
//! and bounded conversation memory, and exposes responding to an
//! incoming message as a streaming operation.

use crate::ConversationMemory;
use anyhow::Result;
use async_stream::try_stream;
use compact_str::CompactString;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::{Generate, Input, Message};
use serde::{Deserialize, Serialize};

/// Backend calling convention for an agent.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Convention {
    /// Role-tagged message list (chat endpoints).
    #[default]
    Chat,
    /// Single flattened prompt string (completion endpoints).
    Completion,
}

/// One dialogue participant.
pub struct Agent<P> {
    /// Agent identifier, unique within a dialogue.
    pub name: CompactString,
    /// Backend model identifier.
    pub model: CompactString,
    /// System instructions sent with each request.
    ///
    /// Deliberately rewritable: turn-start hooks may replace it between
    /// turns (never mid-stream) to steer the agent.
    pub system_prompt: String,
    convention: Convention,
    memory: ConversationMemory,
    provider: P,
}

impl<P: Generate> Agent<P> {
    /// Create a new agent.
    pub fn new(
        name: impl Into<CompactString>,
        model: impl Into<CompactString>,
        provider: P,
    ) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            system_prompt: String::new(),
            convention: Convention::default(),
            memory: ConversationMemory::new(),
            provider,
        }
    }

    /// Set the system prompt.
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the calling convention.
    pub fn convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    /// The agent's conversation memory.
    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    /// Build the model input for an incoming message.
    fn build_input(&self, incoming: &str, include_system: bool) -> Input {
        match self.convention {
            Convention::Chat => {
                let mut messages = Vec::with_capacity(self.memory.len() + 2);
                messages.push(Message::system(&self.system_prompt));
                messages.extend(self.memory.messages().iter().cloned());
                messages.push(Message::user(incoming));
                Input::Chat(messages)
            }
            Convention::Completion => {
                let mut prompt = String::new();
                if include_system && !self.system_prompt.is_empty() {
                    prompt.push_str(&self.system_prompt);
                    prompt.push('\n');
                }
                if !self.memory.is_empty() {
                    prompt.push_str(&self.memory.render());
                    prompt.push('\n');
                }
                prompt.push_str(&format!("Human: {incoming}\nAI:"));
                Input::Completion(prompt)
            }
        }
    }

    /// Respond to an incoming message, streaming text fragments.
    ///
    /// Memory is committed only after the stream has been fully and
    /// successfully drained: the incoming message and the concatenated
    /// response are appended, then history is truncated. A failed
    /// stream leaves memory untouched; the error propagates to the
    /// caller after any fragments already yielded.
    pub fn respond(
        &mut self,
        incoming: String,
        include_system: bool,
    ) -> impl Stream<Item = Result<String>> + Send + '_ {
        let input = self.build_input(&incoming, include_system);
        let provider = self.provider.clone();
        let model = self.model.clone();
        try_stream! {
            let mut inner = std::pin::pin!(provider.generate(model.as_str(), input));
            let mut full = String::new();
            while let Some(fragment) = inner.next().await {
                let fragment = fragment?;
                full.push_str(&fragment);
                yield fragment;
            }
            self.memory
                .record(Message::user(incoming), Message::assistant(full));
        }
    }
}
