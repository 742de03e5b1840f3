//! Chat node: feed messages to the model, stream chunks, append one
//! assistant message.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::graph::{Next, Node, RunContext};
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ChatState;
use crate::stream::{MessageChunk, StreamEvent, StreamMetadata};

/// Graph node that produces the next assistant message.
///
/// When streaming, every model chunk is forwarded as
/// `StreamEvent::Messages` in arrival order, raw, tool-call markup included.
/// The forward loop stops at the cancellation token so a disconnected
/// consumer halts generation at the next chunk boundary.
pub struct ChatNode {
    llm: Arc<dyn LlmClient>,
}

impl ChatNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ChatState> for ChatNode {
    fn id(&self) -> &str {
        "chat"
    }

    async fn run(&self, mut state: ChatState) -> Result<(ChatState, Next), AgentError> {
        let content = self.llm.complete(&state.messages).await?;
        state.messages.push(Message::assistant(content));
        Ok((state, Next::Continue))
    }

    async fn run_with_context(
        &self,
        mut state: ChatState,
        ctx: &RunContext<ChatState>,
    ) -> Result<(ChatState, Next), AgentError> {
        let Some(stream_tx) = ctx.stream_tx.clone() else {
            return self.run(state).await;
        };

        let (chunk_tx, mut chunk_rx) = mpsc::channel::<MessageChunk>(128);
        let node_id = self.id().to_string();
        let cancel = ctx.cancel.clone();
        let forward = async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return true,
                    chunk = chunk_rx.recv() => match chunk {
                        Some(chunk) => {
                            let event = StreamEvent::Messages {
                                chunk,
                                metadata: StreamMetadata {
                                    node: node_id.clone(),
                                },
                            };
                            if stream_tx.send(event).await.is_err() {
                                return true;
                            }
                        }
                        None => return false,
                    },
                }
            }
        };

        let (result, interrupted) = tokio::join!(
            self.llm.stream_completion(&state.messages, Some(chunk_tx)),
            forward,
        );
        let content = result?;
        if interrupted || ctx.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        state.messages.push(Message::assistant(content));
        Ok((state, Next::Continue))
    }
}
