//! Conversation message history management.

use crate::types::{Message, Role};

/// An agent's message history.
///
/// Index 0 is always the system instruction the conversation was created
/// with; [`Conversation::clear`] keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(instruction)],
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn add(&mut self, role: Role, content: impl Into<String>) {
        self.push(Message::new(role, content));
    }

    /// Get all messages, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Drop everything but the instruction.
    pub fn clear(&mut self) {
        self.messages.truncate(1);
    }

    /// The most recent user message, if any.
    pub fn last_user_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.role() == Role::User)
    }

    /// Number of messages, instruction included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false; the instruction is never removed.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_keeps_instruction() {
        let mut conv = Conversation::new("instrucción");
        conv.add(Role::User, "hola");
        conv.add(Role::Assistant, "¿En qué ciudad?");
        assert_eq!(conv.len(), 3);

        conv.clear();

        assert_eq!(conv.messages(), &[Message::system("instrucción")]);
        conv.clear();
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn last_user_message_scans_backwards() {
        let mut conv = Conversation::new("instrucción");
        assert!(conv.last_user_message().is_none());

        conv.add(Role::User, "primero");
        conv.add(Role::Assistant, "ok");
        conv.add(Role::User, "segundo");
        conv.add(Role::Assistant, "ok");

        assert_eq!(conv.last_user_message().map(Message::content), Some("segundo"));
    }
}
