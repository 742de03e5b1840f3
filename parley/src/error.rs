//! Turn-level error taxonomy.
//!
//! Every variant aborts only the in-flight turn; the process and other turns
//! are unaffected. The event translator surfaces these as a single terminal
//! `error` event.

use thiserror::Error;

/// Errors raised while executing one conversation turn.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A tool-call block was present but its content failed to decode.
    #[error("tool call parse: {0}")]
    ToolCallParse(String),

    /// The parsed tool name has no registered implementation.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The invoked tool's own failure, passed through unmodified.
    #[error("tool {name} failed: {message}")]
    ToolExecution { name: String, message: String },

    /// The model client failed to produce a completion.
    #[error("llm request failed: {0}")]
    Llm(String),

    /// The chat ↔ tools loop ran past the configured step budget.
    #[error("recursion limit of {0} reached without reaching a stop condition")]
    RecursionLimit(usize),

    /// The downstream consumer disconnected; the turn stopped early.
    #[error("turn cancelled")]
    Cancelled,

    /// Any other node execution failure.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl AgentError {
    pub fn tool_execution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            name: name.into(),
            message: message.into(),
        }
    }
}
