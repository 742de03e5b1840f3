//! Run configuration: thread identity and loop budget.

/// Configuration for one graph run.
#[derive(Clone, Debug)]
pub struct RunnableConfig {
    /// Identifies the conversation for checkpointing. `None` disables
    /// checkpoint load/save for the run.
    pub thread_id: Option<String>,
    /// Maximum node executions per run; bounds the chat ↔ tools cycle.
    pub recursion_limit: usize,
}

impl RunnableConfig {
    pub const DEFAULT_RECURSION_LIMIT: usize = 25;

    /// Config for a checkpointed thread.
    pub fn for_thread(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Default::default()
        }
    }
}

impl Default for RunnableConfig {
    fn default() -> Self {
        Self {
            thread_id: None,
            recursion_limit: Self::DEFAULT_RECURSION_LIMIT,
        }
    }
}
