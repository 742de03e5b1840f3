//! Graph state for chat turns: the ordered conversation messages.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Conversation state flowing through the chat ↔ tools graph.
///
/// Nodes append messages and never reorder or rewrite existing ones. The
/// chat node appends one assistant message per run; the tools node appends
/// one tool-result message per run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatState {
    pub messages: Vec<Message>,
}

impl ChatState {
    /// Fresh state for a new thread: optional system prompt, then the user
    /// message.
    pub fn new_turn(system_prompt: Option<&str>, user_input: impl Into<String>) -> Self {
        let mut messages = Vec::new();
        if let Some(prompt) = system_prompt {
            messages.push(Message::system(prompt));
        }
        messages.push(Message::user(user_input));
        Self { messages }
    }

    /// Content of the most recent assistant message, if any.
    pub fn last_assistant(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(|m| m.content())
    }
}

#[cfg(test)]
mod tests {
    use super::ChatState;
    use crate::message::Message;

    #[test]
    fn new_turn_orders_system_before_user() {
        let state = ChatState::new_turn(Some("be terse"), "hi");
        assert_eq!(state.messages.len(), 2);
        assert!(matches!(&state.messages[0], Message::System(s) if s == "be terse"));
        assert!(matches!(&state.messages[1], Message::User(s) if s == "hi"));
    }

    #[test]
    fn last_assistant_skips_tool_messages() {
        let mut state = ChatState::new_turn(None, "q");
        state.messages.push(Message::assistant("first"));
        state.messages.push(Message::tool("t", "out", "c1"));
        assert_eq!(state.last_assistant(), Some("first"));
    }

    #[test]
    fn last_assistant_is_none_without_one() {
        let state = ChatState::new_turn(None, "q");
        assert_eq!(state.last_assistant(), None);
    }
}
