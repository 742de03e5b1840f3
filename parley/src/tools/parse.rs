//! Tool-call parsing: extract one structured invocation from a delimited
//! region of model output.
//!
//! The model requests a tool by embedding
//! `<tool_call>{"name": ..., "arguments": {...}}</tool_call>` in its text.
//! Absence of the markup is not an error; most messages are plain text.
//! A present-but-malformed region is a hard [`AgentError::ToolCallParse`].
//! Only the first well-formed region per message is honored.

use serde_json::{Map, Value};

use crate::error::AgentError;

/// Opening sentinel of a tool-call region.
pub const TOOL_CALL_BEGIN: &str = "<tool_call>";

/// Closing sentinel of a tool-call region.
pub const TOOL_CALL_END: &str = "</tool_call>";

/// A structured tool invocation decoded from a delimited region.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedToolCall {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ParsedToolCall {
    /// Arguments as a JSON value, the shape tools receive.
    pub fn arguments_value(&self) -> Value {
        Value::Object(self.arguments.clone())
    }
}

/// True when the text contains the opening sentinel. Used for routing;
/// whether the region actually decodes is decided by [`parse_tool_call`].
pub fn has_tool_call_markup(text: &str) -> bool {
    text.contains(TOOL_CALL_BEGIN)
}

/// Parses the first tool-call region of `text`.
///
/// Returns `Ok(None)` for plain text (no opening sentinel). Returns an error
/// when a region is present but unterminated, is not valid JSON, or lacks a
/// string `name` / object `arguments`.
pub fn parse_tool_call(text: &str) -> Result<Option<ParsedToolCall>, AgentError> {
    let Some(begin) = text.find(TOOL_CALL_BEGIN) else {
        return Ok(None);
    };
    let after = &text[begin + TOOL_CALL_BEGIN.len()..];
    let Some(end) = after.find(TOOL_CALL_END) else {
        return Err(AgentError::ToolCallParse(
            "unterminated tool_call block".to_string(),
        ));
    };
    let raw = after[..end].trim();
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AgentError::ToolCallParse(format!("invalid JSON in tool_call block: {e}")))?;
    let Some(object) = value.as_object() else {
        return Err(AgentError::ToolCallParse(
            "tool_call payload must be a JSON object".to_string(),
        ));
    };
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AgentError::ToolCallParse("tool_call payload missing string field `name`".to_string())
        })?
        .to_string();
    let arguments = object
        .get("arguments")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| {
            AgentError::ToolCallParse(
                "tool_call payload missing object field `arguments`".to_string(),
            )
        })?;
    Ok(Some(ParsedToolCall { name, arguments }))
}
