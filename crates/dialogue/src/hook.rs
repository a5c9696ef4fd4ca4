//! Turn-start hooks.
//!
//! A hook runs at the start of every turn, after the turn is announced
//! and before the speaker is invoked, and may rewrite the speaker's
//! system prompt. `()` is the no-op hook.

use crate::Agent;
use compact_str::CompactString;
use llm::Generate;
use rand::seq::IndexedRandom;

/// A policy invoked at the start of each turn.
pub trait TurnHook {
    /// Called before `agent` speaks on turn `turn` (1-based).
    fn before_turn<P: Generate>(&self, turn: usize, agent: &mut Agent<P>);
}

impl TurnHook for () {
    fn before_turn<P: Generate>(&self, _turn: usize, _agent: &mut Agent<P>) {}
}

/// Rewrites the designated asker's instructions each turn with a topic
/// drawn at random from a fixed list.
///
/// Agents whose name does not match are left alone, and an empty topic
/// list disables the hook entirely.
#[derive(Debug, Clone, Default)]
pub struct TopicRotation {
    agent: CompactString,
    topics: Vec<String>,
}

impl TopicRotation {
    /// Create a rotation targeting the named agent.
    pub fn new(agent: impl Into<CompactString>, topics: Vec<String>) -> Self {
        Self {
            agent: agent.into(),
            topics,
        }
    }

    /// Render the instructions for a chosen topic.
    fn instructions(topic: &str) -> String {
        format!(
            "You are curious and inquisitive. Ask the other participant a question \
             about {topic} and react to what they said. Keep your response concise, \
             about 2-3 sentences."
        )
    }
}

impl TurnHook for TopicRotation {
    fn before_turn<P: Generate>(&self, turn: usize, agent: &mut Agent<P>) {
        if agent.name != self.agent {
            return;
        }
        let Some(topic) = self.topics.choose(&mut rand::rng()) else {
            return;
        };
        tracing::debug!("turn {turn}: steering {} toward {topic}", agent.name);
        agent.system_prompt = Self::instructions(topic);
    }
}
