//! Outward turn event: one typed unit of the externally observable response
//! stream. A turn emits `user`, `start`, then `token`s (and `search`/`urls`
//! notices around tool invocations), terminated by exactly one of `done` or
//! `error`.

use serde::Serialize;
use serde_json::{json, Value};

/// Content of the `start` event payload.
pub const START_CONTENT: &str = "Assistant:";

/// Content of the `done` event payload.
pub const DONE_CONTENT: &str = "[DONE]";

/// One outward event of a streamed turn.
///
/// The wire shape is a pair of an event-kind string ([`TurnEvent::kind`]) and
/// a JSON object payload with a `content` field, or an `error` field for
/// the failure terminal ([`TurnEvent::payload`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum TurnEvent {
    /// Echo of the user input that opened the turn.
    User { content: String },
    /// Turn begins; assistant output follows.
    Start { content: String },
    /// Incremental assistant text. Tool-call markup never appears here.
    Token { content: String },
    /// A tool started a query (e.g. retrieval or web search).
    Search { content: String },
    /// A search tool reported a result list; one event per line of output.
    Urls { content: String },
    /// Terminal success marker.
    Done { content: String },
    /// Terminal failure marker carrying a message.
    Error { error: String },
}

impl TurnEvent {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    pub fn start() -> Self {
        Self::Start {
            content: START_CONTENT.to_string(),
        }
    }

    pub fn token(content: impl Into<String>) -> Self {
        Self::Token {
            content: content.into(),
        }
    }

    pub fn search(content: impl Into<String>) -> Self {
        Self::Search {
            content: content.into(),
        }
    }

    pub fn urls(content: impl Into<String>) -> Self {
        Self::Urls {
            content: content.into(),
        }
    }

    pub fn done() -> Self {
        Self::Done {
            content: DONE_CONTENT.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// The event-kind string of the wire pair.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User { .. } => "user",
            Self::Start { .. } => "start",
            Self::Token { .. } => "token",
            Self::Search { .. } => "search",
            Self::Urls { .. } => "urls",
            Self::Done { .. } => "done",
            Self::Error { .. } => "error",
        }
    }

    /// The JSON object payload of the wire pair: `{"content": ...}`, or
    /// `{"error": ...}` for [`TurnEvent::Error`].
    pub fn payload(&self) -> Value {
        match self {
            Self::User { content }
            | Self::Start { content }
            | Self::Token { content }
            | Self::Search { content }
            | Self::Urls { content }
            | Self::Done { content } => json!({ "content": content }),
            Self::Error { error } => json!({ "error": error }),
        }
    }

    /// True for the two terminal kinds (`done`, `error`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }

    /// Frames this event as one SSE message (`event:` + `data:` lines).
    pub fn sse_frame(&self) -> String {
        crate::frame::sse_frame(self.kind(), &self.payload())
    }
}
