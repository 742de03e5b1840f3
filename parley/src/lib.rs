//! Parley: streaming RAG and research agents with graph-structured turns.
//!
//! A turn enters as one user message and runs a two-node state graph: the
//! `chat` node streams a completion from the model, and when the assistant
//! message embeds a `<tool_call>…</tool_call>` request the `tools` node
//! dispatches it and loops back so the model can incorporate the result.
//! Internal events are translated into an ordered outward feed
//! (`user, start, token*, search/urls*, done|error`) with tool-call markup
//! stripped from tokens.
//!
//! The knowledge base behind the RAG agent is owned by [`IndexManager`]:
//! one immutable index instance at a time, rebuilt wholesale and swapped
//! together with its derived `query_info` tool, with at most one rebuild in
//! flight. [`IndexWatcher`] triggers reloads when files under the data
//! directory change.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tokio_stream::StreamExt;
//!
//! use parley::{IndexManager, KeywordIndexer, MockLlm, RagAgent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let manager = Arc::new(IndexManager::new(
//!     "./data",
//!     "./store_rag",
//!     KeywordIndexer::default(),
//!     4,
//! ));
//! let agent = RagAgent::new(Arc::new(MockLlm::reply("hello")), manager);
//! agent.load_or_build_index().await.unwrap();
//!
//! let mut turn = agent.run_turn("What is in file A?", "thread-1").await;
//! while let Some(event) = turn.next().await {
//!     print!("{}", event.sse_frame());
//! }
//! # }
//! ```

pub mod agent;
pub mod error;
pub mod events;
pub mod graph;
pub mod index;
pub mod llm;
pub mod memory;
pub mod message;
pub mod search;
pub mod state;
pub mod stream;
pub mod tools;
pub mod watch;

pub use agent::{route_tools, ChatNode, RagAgent, ResearchAgent};
pub use error::AgentError;
pub use events::{failed_turn, stream_turn, TokenGate, TurnRequest};
pub use graph::{
    CompilationError, CompiledStateGraph, Next, Node, RunContext, StateGraph, END, START,
};
pub use index::{
    Document, IndexError, IndexManager, IndexQuery, Indexer, KeywordIndexer, MemoryIndex,
    RetrievalTool, ScoredNode, RETRIEVAL_TOOL_NAME,
};
pub use llm::{LlmClient, MockLlm};
pub use memory::{CheckpointError, Checkpointer, MemorySaver, RunnableConfig};
pub use message::Message;
pub use search::{
    SearchClient, SearchError, SearchResponse, SearchResult, TavilyClient, WebSearchTool,
    WEB_SEARCH_TOOL_NAME,
};
pub use state::ChatState;
pub use stream::{MessageChunk, StreamEvent, StreamMetadata};
pub use tools::{
    has_tool_call_markup, parse_tool_call, ParsedToolCall, Tool, ToolNode, ToolRegistry,
    TOOL_CALL_BEGIN, TOOL_CALL_END,
};
pub use turn_event::TurnEvent;
pub use watch::{IndexWatcher, WatcherError};
