//! Checkpointer trait and CheckpointError.

use async_trait::async_trait;

use crate::memory::RunnableConfig;

/// Error type for checkpoint operations.
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    #[error("thread_id required")]
    ThreadIdRequired,
    #[error("storage: {0}")]
    Storage(String),
}

/// Saves and loads per-thread state snapshots.
///
/// **Interaction**: injected via `StateGraph::compile_with_checkpointer`;
/// `CompiledStateGraph` saves after a successful run when `config.thread_id`
/// is set, and turn builders load before a run to resume a conversation.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Persist the state for `config.thread_id`, replacing any previous
    /// snapshot for that thread.
    async fn put(&self, config: &RunnableConfig, state: &S) -> Result<(), CheckpointError>;

    /// Load the latest snapshot for `config.thread_id`, if any.
    async fn get(&self, config: &RunnableConfig) -> Result<Option<S>, CheckpointError>;
}
