//! Conversation types sent upstream.

use serde::{Deserialize, Serialize};

/// The role of a message participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human seeker.
    User,
    /// The Oracle.
    Assistant,
    /// A system persona prompt.
    System,
}

/// One turn of a chat conversation, in the OpenAI-compatible shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub role: Role,
    /// What was said.
    pub content: String,
}

impl ChatMessage {
    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// A system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Which persona the Oracle answers with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Concise guidance on the fast model.
    #[default]
    Standard,
    /// Structured, philosophical answers on the larger model.
    DeepWisdom,
}

impl Mode {
    /// Whether deep wisdom mode is active.
    #[must_use]
    pub fn is_deep_wisdom(self) -> bool {
        matches!(self, Self::DeepWisdom)
    }
}

/// One request to the Oracle: the conversation so far, ending with the
/// seeker's new question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultRequest {
    /// Prior turns plus the new user turn, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Persona to answer with.
    pub mode: Mode,
}

impl ConsultRequest {
    /// A single-question request with no prior history.
    pub fn question(question: impl Into<String>, mode: Mode) -> Self {
        Self {
            messages: vec![ChatMessage::user(question)],
            mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::assistant("Namaste")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "Namaste"}));
    }

    #[test]
    fn question_request_has_one_user_turn() {
        let request = ConsultRequest::question("What is prana?", Mode::DeepWisdom);
        assert_eq!(request.messages, vec![ChatMessage::user("What is prana?")]);
        assert_eq!(request.mode, Mode::DeepWisdom);
    }

    #[test]
    fn default_mode_is_standard() {
        assert_eq!(Mode::default(), Mode::Standard);
        assert!(!Mode::Standard.is_deep_wisdom());
        assert!(Mode::DeepWisdom.is_deep_wisdom());
    }
}
