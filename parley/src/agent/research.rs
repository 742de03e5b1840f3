//! Research agent: turns answered with web search.

use std::sync::Arc;

use tokio_stream::wrappers::ReceiverStream;
use turn_event::TurnEvent;

use env_config::Settings;

use crate::agent::build_chat_graph;
use crate::events::{failed_turn, stream_turn, TurnRequest};
use crate::llm::LlmClient;
use crate::memory::{MemorySaver, RunnableConfig};
use crate::search::{SearchClient, WebSearchTool};
use crate::state::ChatState;
use crate::tools::ToolRegistry;

/// Agent with a fixed tool set: the web search tool.
///
/// Turns are seeded with a system prompt; search results surface to the
/// client as `search` and `urls` events.
pub struct ResearchAgent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    checkpointer: Arc<MemorySaver<ChatState>>,
    system_prompt: String,
}

impl ResearchAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        system_prompt: impl Into<String>,
    ) -> Self {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(WebSearchTool::new(search)));
        Self {
            llm,
            tools: Arc::new(tools),
            checkpointer: Arc::new(MemorySaver::new()),
            system_prompt: system_prompt.into(),
        }
    }

    /// Convenience constructor taking the system prompt from settings.
    pub fn from_settings(
        settings: &Settings,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
    ) -> Self {
        Self::new(llm, search, settings.research_system_prompt.clone())
    }

    /// Runs one streamed research turn.
    pub fn run_turn(
        &self,
        user_input: impl Into<String>,
        thread_id: impl Into<String>,
    ) -> ReceiverStream<TurnEvent> {
        let user_input = user_input.into();
        match build_chat_graph(
            Arc::clone(&self.llm),
            Arc::clone(&self.tools),
            self.checkpointer.clone(),
        ) {
            Ok(compiled) => stream_turn(TurnRequest {
                compiled,
                checkpointer: self.checkpointer.clone(),
                config: RunnableConfig::for_thread(thread_id),
                system_prompt: Some(self.system_prompt.clone()),
                user_input,
            }),
            Err(e) => failed_turn(user_input, e.to_string()),
        }
    }
}
