//! Model client abstraction for the chat node.
//!
//! The chat node depends on a streaming text generator; this module defines
//! the trait and a scriptable mock. Real backends (an OpenAI-compatible
//! server, llama.cpp, …) implement [`LlmClient`] outside this crate.
//!
//! # Streaming
//!
//! `stream_completion` accepts an optional `Sender<MessageChunk>`;
//! implementations that support token streaming send each chunk as it
//! arrives and still return the complete text at the end. The default
//! implementation calls `complete` and sends the full content as one chunk.

mod mock;

pub use mock::MockLlm;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::message::Message;
use crate::stream::MessageChunk;

/// Streaming model client: given messages, returns the assistant text.
///
/// The returned text may embed tool-call markup
/// (`<tool_call>{...}</tool_call>`); routing and suppression are handled by
/// the graph and the event translator, not by the client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion: read messages, return the full assistant text.
    async fn complete(&self, messages: &[Message]) -> Result<String, AgentError>;

    /// Streaming variant: when `chunk_tx` is `Some`, send incremental chunks
    /// through it as they arrive, then return the complete text.
    ///
    /// Implementations should stop producing when the receiver is dropped
    /// (send failure); that is the consumer-disconnect signal.
    async fn stream_completion(
        &self,
        messages: &[Message],
        chunk_tx: Option<mpsc::Sender<MessageChunk>>,
    ) -> Result<String, AgentError> {
        let content = self.complete(messages).await?;
        if let Some(tx) = chunk_tx {
            if !content.is_empty() {
                let _ = tx
                    .send(MessageChunk {
                        content: content.clone(),
                    })
                    .await;
            }
        }
        Ok(content)
    }
}
