//! Dialogue engine: agents with bounded memory, a two-party turn loop,
//! and the ordered event stream it produces.
//!
//! An [`Agent`] owns one participant's identity, instructions, and
//! history. A [`Dialogue`] alternates two agents for a configured number
//! of turns, feeding each one the other's previous output, and re-emits
//! every response fragment as a [`DialogueEvent`]. Pacing and turn-start
//! policies are injected so the loop itself stays mechanism-only.

pub use agent::{Agent, Convention};
pub use dialogue::Dialogue;
pub use event::DialogueEvent;
pub use hook::{TopicRotation, TurnHook};
pub use memory::{ConversationMemory, MEMORY_LIMIT};
pub use pacing::Pacing;

mod agent;
mod dialogue;
mod event;
mod hook;
mod memory;
mod pacing;
