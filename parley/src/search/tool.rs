//! Web search exposed as a tool the model can call.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::AgentError;
use crate::search::SearchClient;
use crate::tools::Tool;

/// Name the model uses to search the web.
pub const WEB_SEARCH_TOOL_NAME: &str = "web_search";

/// `web_search`: runs the query against the configured [`SearchClient`] and
/// returns the ranked result list. The result shape (`results` with `url` /
/// `title` entries) is what the event translator turns into `urls` notices.
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
}

impl WebSearchTool {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL_NAME
    }

    async fn call(&self, arguments: Value) -> Result<Value, AgentError> {
        let query = arguments
            .get("query")
            .or_else(|| arguments.get("input"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AgentError::tool_execution(WEB_SEARCH_TOOL_NAME, "missing string argument `query`")
            })?;
        let response = self
            .client
            .search(query)
            .await
            .map_err(|e| AgentError::tool_execution(WEB_SEARCH_TOOL_NAME, e.to_string()))?;
        let results: Vec<Value> = response
            .results
            .iter()
            .map(|r| {
                json!({
                    "url": r.url,
                    "title": r.title,
                    "content": r.content,
                    "score": r.score,
                })
            })
            .collect();
        Ok(json!({ "query": query, "results": results }))
    }
}
