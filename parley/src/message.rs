//! Conversation message: role + content, with tool metadata for tool results.

use serde::{Deserialize, Serialize};

/// One message of a conversation.
///
/// Messages are append-only during a turn; ordering is the causal order of
/// production. Tool results carry the tool name and a correlation id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    System(String),
    User(String),
    Assistant(String),
    Tool {
        name: String,
        content: String,
        call_id: String,
    },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    pub fn tool(
        name: impl Into<String>,
        content: impl Into<String>,
        call_id: impl Into<String>,
    ) -> Self {
        Self::Tool {
            name: name.into(),
            content: content.into(),
            call_id: call_id.into(),
        }
    }

    /// Message text regardless of role.
    pub fn content(&self) -> &str {
        match self {
            Self::System(s) | Self::User(s) | Self::Assistant(s) => s,
            Self::Tool { content, .. } => content,
        }
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Self::Assistant(_))
    }
}
