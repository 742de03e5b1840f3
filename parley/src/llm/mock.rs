//! Scriptable mock model client for tests and demos.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::stream::MessageChunk;

/// Mock [`LlmClient`] that replays a scripted sequence of replies.
///
/// Each `complete` call pops the next reply (the last one repeats once the
/// script is exhausted) and records the messages it was given, so tests can
/// assert on prompt construction. `with_chunk_size` streams replies in
/// fixed-size character chunks; `with_chunk_delay` paces them, which lets
/// tests observe mid-stream cancellation.
pub struct MockLlm {
    replies: Mutex<VecDeque<String>>,
    last_reply: Mutex<String>,
    chunk_size: Option<usize>,
    chunk_delay: Duration,
    chunks_sent: AtomicUsize,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// A script of replies, replayed in order.
    pub fn script<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            last_reply: Mutex::new(String::new()),
            chunk_size: None,
            chunk_delay: Duration::ZERO,
            chunks_sent: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A single fixed reply.
    pub fn reply(content: impl Into<String>) -> Self {
        Self::script([content.into()])
    }

    /// Stream replies in chunks of `size` characters instead of one chunk.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = Some(size.max(1));
        self
    }

    /// Sleep between chunks; combined with `with_chunk_size` this simulates
    /// a slow token stream.
    pub fn with_chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Number of chunks sent across all streaming calls so far.
    pub fn chunks_sent(&self) -> usize {
        self.chunks_sent.load(Ordering::SeqCst)
    }

    /// Message sequences observed by `complete`, in call order.
    pub fn seen_messages(&self) -> Vec<Vec<Message>> {
        self.seen.lock().expect("mock lock poisoned").clone()
    }

    fn next_reply(&self) -> String {
        let mut replies = self.replies.lock().expect("mock lock poisoned");
        match replies.pop_front() {
            Some(reply) => {
                *self.last_reply.lock().expect("mock lock poisoned") = reply.clone();
                reply
            }
            None => self.last_reply.lock().expect("mock lock poisoned").clone(),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, messages: &[Message]) -> Result<String, AgentError> {
        self.seen
            .lock()
            .expect("mock lock poisoned")
            .push(messages.to_vec());
        Ok(self.next_reply())
    }

    async fn stream_completion(
        &self,
        messages: &[Message],
        chunk_tx: Option<mpsc::Sender<MessageChunk>>,
    ) -> Result<String, AgentError> {
        let content = self.complete(messages).await?;
        let Some(tx) = chunk_tx else {
            return Ok(content);
        };
        let size = self.chunk_size.unwrap_or(usize::MAX);
        let chars: Vec<char> = content.chars().collect();
        for piece in chars.chunks(size.min(chars.len().max(1))) {
            if !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
            let chunk = MessageChunk {
                content: piece.iter().collect(),
            };
            if tx.send(chunk).await.is_err() {
                // Receiver dropped: the consumer disconnected.
                break;
            }
            self.chunks_sent.fetch_add(1, Ordering::SeqCst);
        }
        Ok(content)
    }
}
