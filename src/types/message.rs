//! Message types for model communication.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A single role-tagged message in a conversation.
///
/// Serializes to exactly `{"role": ..., "content": ...}`, which is what the
/// chat completion endpoint expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Conversation role.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_serializes_to_role_and_content_only() {
        let json = serde_json::to_value(Message::user("hola")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hola"}));
    }

    #[test]
    fn role_parses_from_lowercase_name() {
        assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
        assert_eq!(Role::System.to_string(), "system");
        assert!("tool".parse::<Role>().is_err());
    }
}
