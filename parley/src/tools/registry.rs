//! Tool trait and the name → implementation registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;

/// A single callable capability the model can request by name.
///
/// Implementations: the retrieval tool bound to an index snapshot
/// ([`RetrievalTool`](crate::index::RetrievalTool)) and the web search tool
/// ([`WebSearchTool`](crate::search::WebSearchTool)).
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within one registry; the model addresses the tool by it.
    fn name(&self) -> &str;

    /// Executes the tool. The result is a JSON value whose shape is the
    /// tool's own contract; failures are the tool's own errors, surfaced
    /// unmodified to the caller.
    async fn call(&self, arguments: Value) -> Result<Value, AgentError>;
}

/// Maps tool names to implementations and dispatches invocations.
///
/// Registries are built once (per index publish, or at agent construction)
/// and then shared immutably behind an `Arc`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool under its name. Re-registering a name replaces the
    /// previous implementation (latest wins).
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name().to_string(), tool);
        self
    }

    /// Invokes a tool by name.
    ///
    /// An unregistered name fails with [`AgentError::UnknownTool`] carrying
    /// the requested name; the tool's own failure propagates unmodified.
    pub async fn invoke(&self, name: &str, arguments: Value) -> Result<Value, AgentError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))?;
        tool.call(arguments).await
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedTool {
        name: &'static str,
        output: Value,
    }

    #[async_trait]
    impl Tool for FixedTool {
        fn name(&self) -> &str {
            self.name
        }
        async fn call(&self, _arguments: Value) -> Result<Value, AgentError> {
            Ok(self.output.clone())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }
        async fn call(&self, _arguments: Value) -> Result<Value, AgentError> {
            Err(AgentError::tool_execution("failing", "upstream down"))
        }
    }

    #[tokio::test]
    async fn invoke_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FixedTool {
            name: "echo",
            output: json!({"ok": true}),
        }));
        let out = registry.invoke("echo", json!({})).await.unwrap();
        assert_eq!(out, json!({"ok": true}));
    }

    #[tokio::test]
    async fn unknown_name_fails_with_that_name() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", json!({})).await.unwrap_err();
        match err {
            AgentError::UnknownTool(name) => assert_eq!(name, "nope"),
            other => panic!("expected UnknownTool, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn tool_failure_is_surfaced_unmodified() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));
        let err = registry.invoke("failing", json!({})).await.unwrap_err();
        assert!(
            matches!(err, AgentError::ToolExecution { ref name, .. } if name == "failing"),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn latest_registration_wins_on_name_reuse() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FixedTool {
            name: "t",
            output: json!(1),
        }));
        registry.register(Arc::new(FixedTool {
            name: "t",
            output: json!(2),
        }));
        assert_eq!(registry.len(), 1);
        let out = registry.invoke("t", json!({})).await.unwrap();
        assert_eq!(out, json!(2));
    }
}
