//! Web search: provider trait, the Tavily HTTP client, and the tool
//! exposing search to the model.

mod tavily;
mod tool;

pub use tavily::TavilyClient;
pub use tool::{WebSearchTool, WEB_SEARCH_TOOL_NAME};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the search provider.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(String),
    #[error("search provider error: {0}")]
    Provider(String),
}

/// One web search hit, consumed read-only from the provider.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub score: f32,
}

/// Provider response: a ranked result list.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// External search capability consumed by [`WebSearchTool`].
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError>;
}
