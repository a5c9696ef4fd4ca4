//! Dialogue events — the wire-independent unit the turn loop produces.

use compact_str::CompactString;
use serde::Serialize;

/// One event in a dialogue stream.
///
/// Ordering is significant and preserved end to end (strict FIFO,
/// single consumer). JSON serialization follows the wire tags;
/// [`DialogueEvent::Done`] is never serialized as JSON — the publisher
/// maps it to the terminal sentinel frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DialogueEvent {
    /// The scene description, announced once before the first turn.
    Setting {
        /// The setting text.
        content: String,
    },
    /// A speaker begins a turn.
    #[serde(rename = "start")]
    TurnStart {
        /// The speaker's name.
        agent: CompactString,
    },
    /// One incremental fragment of the current speaker's response.
    Word {
        /// The fragment text, never empty.
        content: String,
    },
    /// The current speaker's turn completed.
    #[serde(rename = "end")]
    TurnEnd,
    /// Terminal event, always the last of a dialogue.
    #[serde(skip)]
    Done,
}
