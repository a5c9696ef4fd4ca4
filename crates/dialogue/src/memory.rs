//! Bounded per-agent conversation memory.

use llm::Message;

/// Maximum number of messages retained after each completed turn.
pub const MEMORY_LIMIT: usize = 10;

/// An ordered, bounded message history owned by one agent.
///
/// Mutated only once a response has fully completed: a turn either
/// records both of its messages or none of them. Truncation drops the
/// oldest entries and preserves relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationMemory {
    messages: Vec<Message>,
}

impl ConversationMemory {
    /// Create an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed turn: the incoming user message, then the
    /// full assistant response, then truncate to [`MEMORY_LIMIT`].
    pub fn record(&mut self, user: Message, assistant: Message) {
        self.messages.push(user);
        self.messages.push(assistant);
        if self.messages.len() > MEMORY_LIMIT {
            let excess = self.messages.len() - MEMORY_LIMIT;
            self.messages.drain(..excess);
        }
    }

    /// The retained messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of retained messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the memory is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the history as "role: content" lines for flat-prompt
    /// backends.
    pub fn render(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_user_then_assistant() {
        let mut memory = ConversationMemory::new();
        memory.record(Message::user("hi"), Message::assistant("hello"));

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.messages()[0], Message::user("hi"));
        assert_eq!(memory.messages()[1], Message::assistant("hello"));
    }

    #[test]
    fn truncation_drops_oldest_preserving_order() {
        let mut memory = ConversationMemory::new();
        for i in 0..7 {
            memory.record(
                Message::user(format!("u{i}")),
                Message::assistant(format!("a{i}")),
            );
        }

        assert_eq!(memory.len(), MEMORY_LIMIT);
        // The two oldest turns are gone; the rest keep their order.
        assert_eq!(memory.messages()[0], Message::user("u2"));
        assert_eq!(memory.messages()[9], Message::assistant("a6"));
    }

    #[test]
    fn render_joins_role_tagged_lines() {
        let mut memory = ConversationMemory::new();
        memory.record(Message::user("hi"), Message::assistant("hello"));

        assert_eq!(memory.render(), "user: hi\nassistant: hello");
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(ConversationMemory::new().render(), "");
    }
}
