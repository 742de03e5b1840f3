//! RAG agent: turns answered from the knowledge index.

use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use turn_event::TurnEvent;

use env_config::Settings;

use crate::agent::build_chat_graph;
use crate::events::{failed_turn, stream_turn, TurnRequest};
use crate::index::{IndexError, IndexManager, Indexer};
use crate::llm::LlmClient;
use crate::memory::{MemorySaver, RunnableConfig};
use crate::state::ChatState;

/// Agent whose tool set is derived from the active knowledge index.
///
/// Each turn snapshots [`IndexManager::current_tools`] and builds its graph
/// against that snapshot; a reload that swaps the index mid-turn does not
/// affect the turn already in flight. Conversations checkpoint per
/// `thread_id` for the process lifetime.
pub struct RagAgent<I: Indexer> {
    llm: Arc<dyn LlmClient>,
    index: Arc<IndexManager<I>>,
    checkpointer: Arc<MemorySaver<ChatState>>,
}

impl<I: Indexer> RagAgent<I> {
    pub fn new(llm: Arc<dyn LlmClient>, index: Arc<IndexManager<I>>) -> Self {
        Self {
            llm,
            index,
            checkpointer: Arc::new(MemorySaver::new()),
        }
    }

    /// Convenience constructor wiring the index manager from settings.
    pub fn from_settings(settings: &Settings, llm: Arc<dyn LlmClient>, indexer: I) -> Self {
        Self::new(llm, Arc::new(IndexManager::from_settings(settings, indexer)))
    }

    /// Startup: load the persisted index or build it from documents.
    pub async fn load_or_build_index(&self) -> Result<(), IndexError> {
        self.index.load_or_build().await
    }

    /// Rebuilds the index from the current documents; safe to call
    /// concurrently (rebuilds are serialized, never parallel). Exposed for
    /// upload/delete endpoints and the filesystem watcher.
    pub async fn reload_index(&self) {
        self.index.reload().await;
    }

    pub fn index_manager(&self) -> Arc<IndexManager<I>> {
        Arc::clone(&self.index)
    }

    /// Runs one streamed turn against the current index snapshot.
    ///
    /// With an empty index the tool set is empty: the model cannot invoke
    /// retrieval and the turn still completes normally.
    pub async fn run_turn(
        &self,
        user_input: impl Into<String>,
        thread_id: impl Into<String>,
    ) -> ReceiverStream<TurnEvent> {
        let user_input = user_input.into();
        let tools = self.index.current_tools().await;
        match build_chat_graph(
            Arc::clone(&self.llm),
            tools,
            self.checkpointer.clone(),
        ) {
            Ok(compiled) => stream_turn(TurnRequest {
                compiled,
                checkpointer: self.checkpointer.clone(),
                config: RunnableConfig::for_thread(thread_id),
                system_prompt: None,
                user_input,
            }),
            Err(e) => failed_turn(user_input, e.to_string()),
        }
    }
}
