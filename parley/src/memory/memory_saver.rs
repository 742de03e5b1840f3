//! In-memory checkpointer: one snapshot per thread, for the process lifetime.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::memory::{CheckpointError, Checkpointer, RunnableConfig};

/// In-memory [`Checkpointer`]: a concurrent map from thread id to the last
/// saved state. Suitable for a single-process server; nothing survives a
/// restart.
#[derive(Default)]
pub struct MemorySaver<S> {
    threads: DashMap<String, S>,
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self {
            threads: DashMap::new(),
        }
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(&self, config: &RunnableConfig, state: &S) -> Result<(), CheckpointError> {
        let thread_id = config
            .thread_id
            .as_ref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        self.threads.insert(thread_id.clone(), state.clone());
        Ok(())
    }

    async fn get(&self, config: &RunnableConfig) -> Result<Option<S>, CheckpointError> {
        let thread_id = config
            .thread_id
            .as_ref()
            .ok_or(CheckpointError::ThreadIdRequired)?;
        Ok(self.threads.get(thread_id).map(|entry| entry.value().clone()))
    }
}
