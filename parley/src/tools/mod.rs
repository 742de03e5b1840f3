//! Tools: the call parser, the name → implementation registry, and the
//! graph node that dispatches parsed calls.

mod node;
pub mod parse;
mod registry;

pub use node::ToolNode;
pub use parse::{
    has_tool_call_markup, parse_tool_call, ParsedToolCall, TOOL_CALL_BEGIN, TOOL_CALL_END,
};
pub use registry::{Tool, ToolRegistry};
