//! Tools node: parse the last assistant message, dispatch the call, append
//! the result as a tool message.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::message::Message;
use crate::state::ChatState;
use crate::stream::StreamEvent;
use crate::tools::parse::parse_tool_call;
use crate::tools::ToolRegistry;

/// Graph node that executes the tool call embedded in the last assistant
/// message.
///
/// Routing only enters this node when the opening sentinel is present, so a
/// missing or malformed region here is a hard error that terminates the
/// turn, never silently ignored. The result is appended as a
/// `Message::Tool` and control returns to the chat node.
pub struct ToolNode {
    registry: Arc<ToolRegistry>,
}

impl ToolNode {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    async fn execute(
        &self,
        mut state: ChatState,
        ctx: &RunContext<ChatState>,
    ) -> Result<(ChatState, Next), AgentError> {
        let content = state.last_assistant().ok_or_else(|| {
            AgentError::ExecutionFailed("tools node requires a prior assistant message".to_string())
        })?;
        let call = parse_tool_call(content)?.ok_or_else(|| {
            AgentError::ToolCallParse("no <tool_call> block found in message content".to_string())
        })?;

        if ctx.is_cancelled() {
            return Err(AgentError::Cancelled);
        }
        let arguments = call.arguments_value();
        ctx.emit(StreamEvent::ToolStart {
            name: call.name.clone(),
            arguments: arguments.clone(),
        })
        .await;

        let output = self.registry.invoke(&call.name, arguments).await?;

        if ctx.is_cancelled() {
            return Err(AgentError::Cancelled);
        }
        ctx.emit(StreamEvent::ToolEnd {
            name: call.name.clone(),
            output: output.clone(),
        })
        .await;

        let serialized = serde_json::to_string(&output)
            .map_err(|e| AgentError::ExecutionFailed(format!("serialize tool result: {e}")))?;
        state
            .messages
            .push(Message::tool(call.name, serialized, Uuid::new_v4().to_string()));
        Ok((state, Next::Continue))
    }
}

#[async_trait]
impl Node<ChatState> for ToolNode {
    fn id(&self) -> &str {
        "tools"
    }

    async fn run(&self, state: ChatState) -> Result<(ChatState, Next), AgentError> {
        self.execute(state, &RunContext::detached()).await
    }

    async fn run_with_context(
        &self,
        state: ChatState,
        ctx: &RunContext<ChatState>,
    ) -> Result<(ChatState, Next), AgentError> {
        self.execute(state, ctx).await
    }
}
