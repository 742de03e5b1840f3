//! Retrieval tool bound to one index snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::AgentError;
use crate::index::IndexQuery;
use crate::tools::Tool;

/// Name the model uses to search the knowledge base.
pub const RETRIEVAL_TOOL_NAME: &str = "query_info";

/// `query_info`: searches the knowledge base behind this tool's index
/// snapshot.
///
/// The snapshot is fixed at registration; when the index manager publishes a
/// new instance it registers a new `RetrievalTool`, so in-flight turns keep
/// querying the instance they started with.
pub struct RetrievalTool {
    index: Arc<dyn IndexQuery>,
    top_k: usize,
}

impl RetrievalTool {
    pub fn new(index: Arc<dyn IndexQuery>, top_k: usize) -> Self {
        Self { index, top_k }
    }
}

#[async_trait]
impl Tool for RetrievalTool {
    fn name(&self) -> &str {
        RETRIEVAL_TOOL_NAME
    }

    async fn call(&self, arguments: Value) -> Result<Value, AgentError> {
        let query = arguments
            .get("query")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                AgentError::tool_execution(RETRIEVAL_TOOL_NAME, "missing string argument `query`")
            })?;
        let nodes = self
            .index
            .query(query, self.top_k)
            .await
            .map_err(|e| AgentError::tool_execution(RETRIEVAL_TOOL_NAME, e.to_string()))?;
        let results: Vec<Value> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                json!({
                    "result_number": i + 1,
                    "file_name": node.file_name,
                    "page_number": node.page_label.as_deref().unwrap_or("Unknown"),
                    "content": node.text.trim(),
                    "score": node.score,
                })
            })
            .collect();
        Ok(json!({
            "query": query,
            "results": results,
            "total_results": results.len(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::index::{IndexError, ScoredNode};

    struct FixedIndex(Vec<ScoredNode>);

    #[async_trait]
    impl IndexQuery for FixedIndex {
        async fn query(&self, _text: &str, top_k: usize) -> Result<Vec<ScoredNode>, IndexError> {
            Ok(self.0.iter().take(top_k).cloned().collect())
        }
    }

    #[tokio::test]
    async fn formats_results_with_numbering_and_unknown_page() {
        let tool = RetrievalTool::new(
            Arc::new(FixedIndex(vec![ScoredNode {
                text: "  some text  ".to_string(),
                score: 0.5,
                file_name: "a.txt".to_string(),
                page_label: None,
            }])),
            4,
        );
        let out = tool
            .call(serde_json::json!({"query": "anything"}))
            .await
            .unwrap();
        assert_eq!(out["query"], "anything");
        assert_eq!(out["total_results"], 1);
        assert_eq!(out["results"][0]["result_number"], 1);
        assert_eq!(out["results"][0]["file_name"], "a.txt");
        assert_eq!(out["results"][0]["page_number"], "Unknown");
        assert_eq!(out["results"][0]["content"], "some text");
    }

    #[tokio::test]
    async fn missing_query_argument_is_a_tool_error() {
        let tool = RetrievalTool::new(Arc::new(FixedIndex(Vec::new())), 4);
        let err = tool.call(serde_json::json!({})).await.unwrap_err();
        assert!(
            matches!(err, AgentError::ToolExecution { ref name, .. } if name == RETRIEVAL_TOOL_NAME)
        );
    }
}
