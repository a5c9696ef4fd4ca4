//! The two-party turn loop.
//!
//! Drives N alternating turns between two agents and re-emits each
//! speaker's fragment stream as ordered [`DialogueEvent`]s. Each turn's
//! input is the previous turn's complete output, trimmed — never
//! synthesized. The terminal [`DialogueEvent::Done`] is emitted on
//! every path, including upstream failure.

use crate::{Agent, DialogueEvent, Pacing, TurnHook};
use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use llm::Generate;

/// The fixed opening instruction for the first speaker.
fn opening_prompt(setting: &str) -> String {
    format!(
        "We are in this setting: {setting}. Have a conversation with the other \
         agent, responding to their previous statement. Keep your response \
         concise, about 2-3 sentences."
    )
}

/// A two-party dialogue ready to run.
///
/// Holds its agents by value: a dialogue lives for exactly one stream
/// and nothing survives it.
pub struct Dialogue<P, H = ()> {
    agents: [Agent<P>; 2],
    setting: String,
    turns: usize,
    pacing: Pacing,
    hook: H,
}

impl<P: Generate> Dialogue<P> {
    /// Create a dialogue between two agents. `first` opens the
    /// conversation.
    pub fn new(
        first: Agent<P>,
        second: Agent<P>,
        setting: impl Into<String>,
        turns: usize,
    ) -> Self {
        Self {
            agents: [first, second],
            setting: setting.into(),
            turns,
            pacing: Pacing::default(),
            hook: (),
        }
    }
}

impl<P: Generate, H: TurnHook + Send + 'static> Dialogue<P, H> {
    /// Replace the pacing policy.
    pub fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Install a turn-start hook.
    pub fn hook<H2: TurnHook + Send + 'static>(self, hook: H2) -> Dialogue<P, H2> {
        Dialogue {
            agents: self.agents,
            setting: self.setting,
            turns: self.turns,
            pacing: self.pacing,
            hook,
        }
    }

    /// Run the dialogue to completion, yielding ordered events.
    ///
    /// An upstream failure aborts the failed turn (no `TurnEnd`) and all
    /// remaining turns; `Done` is still the final event. The stream is
    /// driven by a single task — dropping it cancels the in-flight
    /// backend call and any pending pacing delay.
    pub fn run(self) -> impl Stream<Item = DialogueEvent> + Send {
        let Self {
            agents: [mut current, mut other],
            setting,
            turns,
            pacing,
            hook,
        } = self;

        stream! {
            yield DialogueEvent::Setting {
                content: setting.clone(),
            };
            let mut prompt = opening_prompt(&setting);

            'turns: for turn in 1..=turns {
                yield DialogueEvent::TurnStart {
                    agent: current.name.clone(),
                };
                hook.before_turn(turn, &mut current);

                let mut full = String::new();
                let mut turn_error = None;
                {
                    let mut responses = std::pin::pin!(current.respond(prompt, true));
                    while let Some(result) = responses.next().await {
                        match result {
                            Ok(fragment) => {
                                full.push_str(&fragment);
                                yield DialogueEvent::Word { content: fragment };
                                pacing.after_word().await;
                            }
                            Err(e) => {
                                turn_error = Some(e);
                                break;
                            }
                        }
                    }
                }
                if let Some(e) = turn_error {
                    tracing::error!("turn {turn} aborted: {e:#}");
                    break 'turns;
                }

                yield DialogueEvent::TurnEnd;
                pacing.after_turn().await;

                prompt = full.trim().to_owned();
                std::mem::swap(&mut current, &mut other);
            }

            yield DialogueEvent::Done;
        }
    }
}
