//! Scripted provider for testing.
//!
//! Replays configured fragment sequences instead of calling a real
//! backend, and records every input it receives. Each `generate` call
//! consumes one scripted turn, in queue order. Intended for unit tests
//! that exercise agent and dialogue logic without network access.

use crate::{Generate, Input};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Step {
    Fragment(String),
    Fail(String),
}

/// A scripted LLM provider that replays canned turns.
///
/// Clones share the same script queue and call log, so one `Mock` can
/// back several agents while the script is consumed globally in call
/// order. An exhausted script fails the stream.
#[derive(Clone, Default)]
pub struct Mock {
    turns: Arc<Mutex<VecDeque<Vec<Step>>>>,
    calls: Arc<Mutex<Vec<Input>>>,
}

impl Mock {
    /// Create an empty mock. A `generate` call without a scripted turn
    /// yields a terminal error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a turn that yields the given fragments, then completes.
    pub fn turn<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.turns.lock().unwrap().push_back(
            fragments
                .into_iter()
                .map(|f| Step::Fragment(f.into()))
                .collect(),
        );
        self
    }

    /// Queue a turn that yields the given fragments, then fails.
    pub fn failing_turn<I, S>(self, fragments: I, error: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut steps: Vec<Step> = fragments
            .into_iter()
            .map(|f| Step::Fragment(f.into()))
            .collect();
        steps.push(Step::Fail(error.into()));
        self.turns.lock().unwrap().push_back(steps);
        self
    }

    /// Inputs received so far, in call order.
    pub fn calls(&self) -> Vec<Input> {
        self.calls.lock().unwrap().clone()
    }
}

impl Generate for Mock {
    fn generate(
        &self,
        _model: &str,
        input: Input,
    ) -> impl Stream<Item = Result<String>> + Send + 'static {
        self.calls.lock().unwrap().push(input);
        let turn = self.turns.lock().unwrap().pop_front();
        try_stream! {
            let Some(steps) = turn else {
                Err(anyhow::anyhow!("mock script exhausted"))?;
                return;
            };
            for step in steps {
                match step {
                    Step::Fragment(fragment) => yield fragment,
                    Step::Fail(error) => Err(anyhow::anyhow!(error))?,
                }
            }
        }
    }
}
