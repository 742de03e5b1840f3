//! Agents: the chat ↔ tools graph and the two turn surfaces (RAG,
//! research).
//!
//! Both agents share one graph shape: `START → chat`, conditional edges
//! from `chat` (`tools` when the assistant message contains a tool-call
//! region, otherwise `END`), and `tools → chat` so the model incorporates
//! the tool result. They differ only in where their tool registries come
//! from and in the system prompt.

mod chat_node;
mod rag;
mod research;

pub use chat_node::ChatNode;
pub use rag::RagAgent;
pub use research::ResearchAgent;

use std::collections::HashMap;
use std::sync::Arc;

use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::LlmClient;
use crate::memory::Checkpointer;
use crate::state::ChatState;
use crate::tools::{has_tool_call_markup, ToolNode, ToolRegistry};

/// Conditional routing out of the chat node: `tools` when the last
/// assistant message contains a tool-call region, otherwise END.
pub fn route_tools(state: &ChatState) -> String {
    match state.last_assistant() {
        Some(content) if has_tool_call_markup(content) => "tools".to_string(),
        _ => END.to_string(),
    }
}

/// Builds the shared two-node turn graph over the given tool registry.
pub(crate) fn build_chat_graph(
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    checkpointer: Arc<dyn Checkpointer<ChatState>>,
) -> Result<CompiledStateGraph<ChatState>, CompilationError> {
    let path_map: HashMap<String, String> = [
        ("tools".to_string(), "tools".to_string()),
        (END.to_string(), END.to_string()),
    ]
    .into_iter()
    .collect();

    let mut graph = StateGraph::<ChatState>::new();
    graph
        .add_node("chat", Arc::new(ChatNode::new(llm)))
        .add_node("tools", Arc::new(ToolNode::new(tools)))
        .add_edge(START, "chat")
        .add_conditional_edges("chat", Arc::new(route_tools), Some(path_map))
        .add_edge("tools", "chat");
    graph.compile_with_checkpointer(checkpointer)
}
