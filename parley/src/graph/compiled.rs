//! Compiled graph: run nodes from START to END, invoke or stream.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::error::AgentError;
use crate::graph::conditional::NextEntry;
use crate::graph::node::Node;
use crate::graph::run_context::RunContext;
use crate::graph::state_graph::END;
use crate::graph::Next;
use crate::memory::{Checkpointer, RunnableConfig};
use crate::stream::StreamEvent;

/// Buffer size for streamed events. Bounds memory when the consumer lags.
const STREAM_BUFFER: usize = 128;

/// Executable graph produced by `StateGraph::compile`.
///
/// `invoke` runs to END and returns the final state. `stream` runs in a
/// spawned task and yields [`StreamEvent`]s as they are produced; the final
/// state arrives as `StreamEvent::Values`. When compiled with a checkpointer
/// and run with a `thread_id`, the final state is saved after a successful
/// run.
pub struct CompiledStateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    first_node_id: String,
    next_map: HashMap<String, NextEntry<S>>,
    checkpointer: Option<Arc<dyn Checkpointer<S>>>,
}

impl<S> Clone for CompiledStateGraph<S> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            first_node_id: self.first_node_id.clone(),
            next_map: self.next_map.clone(),
            checkpointer: self.checkpointer.clone(),
        }
    }
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    pub(crate) fn new(
        nodes: HashMap<String, Arc<dyn Node<S>>>,
        first_node_id: String,
        next_map: HashMap<String, NextEntry<S>>,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Self {
        Self {
            nodes,
            first_node_id,
            next_map,
            checkpointer,
        }
    }

    /// Runs the graph to completion and returns the final state.
    pub async fn invoke(&self, state: S, config: Option<RunnableConfig>) -> Result<S, AgentError> {
        let ctx = RunContext::detached();
        let final_state = self.run_loop(state, config.as_ref(), &ctx).await?;
        self.save_checkpoint(&final_state, config.as_ref()).await;
        Ok(final_state)
    }

    /// Runs the graph in a spawned task, yielding events as they are produced.
    ///
    /// The stream is finite and non-restartable. A successful run ends with
    /// `StreamEvent::Values(final_state)`; a failed run ends with a
    /// `TaskEnd { result: Err(..) }` for the failing node and no `Values`.
    pub fn stream(&self, state: S, config: Option<RunnableConfig>) -> ReceiverStream<StreamEvent<S>> {
        self.stream_with_cancel(state, config, CancellationToken::new())
    }

    /// Like [`CompiledStateGraph::stream`], with an externally owned
    /// cancellation token. Once `cancel` fires, the run stops at its next
    /// suspension point and emits nothing further.
    pub fn stream_with_cancel(
        &self,
        state: S,
        config: Option<RunnableConfig>,
        cancel: CancellationToken,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let graph = self.clone();
        tokio::spawn(async move {
            let ctx = RunContext::new(tx.clone(), cancel);
            match graph.run_loop(state, config.as_ref(), &ctx).await {
                Ok(final_state) => {
                    graph.save_checkpoint(&final_state, config.as_ref()).await;
                    let _ = tx.send(StreamEvent::Values(final_state)).await;
                }
                Err(AgentError::Cancelled) => {
                    // Consumer is gone; stop without a terminal event.
                }
                Err(e) => {
                    tracing::debug!("graph run failed: {e}");
                }
            }
        });
        ReceiverStream::new(rx)
    }

    async fn run_loop(
        &self,
        mut state: S,
        config: Option<&RunnableConfig>,
        ctx: &RunContext<S>,
    ) -> Result<S, AgentError> {
        let limit = config
            .map(|c| c.recursion_limit)
            .unwrap_or(RunnableConfig::DEFAULT_RECURSION_LIMIT);
        let mut current = self.first_node_id.clone();
        let mut steps = 0usize;
        loop {
            if ctx.is_cancelled() {
                return Err(AgentError::Cancelled);
            }
            if steps >= limit {
                let err = AgentError::RecursionLimit(limit);
                self.emit_failure(ctx, &current, &err).await;
                return Err(err);
            }
            steps += 1;

            let Some(node) = self.nodes.get(&current) else {
                let err =
                    AgentError::ExecutionFailed(format!("no node registered for id: {current}"));
                self.emit_failure(ctx, &current, &err).await;
                return Err(err);
            };

            ctx.emit(StreamEvent::TaskStart {
                node_id: current.clone(),
            })
            .await;
            let (new_state, next) = match node.run_with_context(state, ctx).await {
                Ok(pair) => pair,
                Err(AgentError::Cancelled) => return Err(AgentError::Cancelled),
                Err(e) => {
                    self.emit_failure(ctx, &current, &e).await;
                    return Err(e);
                }
            };
            ctx.emit(StreamEvent::TaskEnd {
                node_id: current.clone(),
                result: Ok(()),
            })
            .await;
            state = new_state;

            if next == Next::End {
                return Ok(state);
            }
            match self.next_map.get(&current) {
                None => return Ok(state),
                Some(NextEntry::Unconditional(to)) if to.as_str() == END => return Ok(state),
                Some(NextEntry::Unconditional(to)) => current = to.clone(),
                Some(NextEntry::Conditional(router)) => {
                    let to = router.resolve(&state);
                    if to == END {
                        return Ok(state);
                    }
                    current = to;
                }
            }
        }
    }

    async fn emit_failure(&self, ctx: &RunContext<S>, node_id: &str, err: &AgentError) {
        ctx.emit(StreamEvent::TaskEnd {
            node_id: node_id.to_string(),
            result: Err(err.to_string()),
        })
        .await;
    }

    async fn save_checkpoint(&self, state: &S, config: Option<&RunnableConfig>) {
        let (Some(cp), Some(cfg)) = (self.checkpointer.as_ref(), config) else {
            return;
        };
        if cfg.thread_id.is_none() {
            return;
        }
        if let Err(e) = cp.put(cfg, state).await {
            tracing::warn!("checkpoint save failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::graph::{StateGraph, END, START};

    #[derive(Clone, Debug, Default)]
    struct CountState {
        hops: Vec<String>,
    }

    struct HopNode(&'static str);

    #[async_trait]
    impl Node<CountState> for HopNode {
        fn id(&self) -> &str {
            self.0
        }
        async fn run(&self, mut state: CountState) -> Result<(CountState, Next), AgentError> {
            state.hops.push(self.0.to_string());
            Ok((state, Next::Continue))
        }
    }

    struct FailNode;

    #[async_trait]
    impl Node<CountState> for FailNode {
        fn id(&self) -> &str {
            "fail"
        }
        async fn run(&self, _state: CountState) -> Result<(CountState, Next), AgentError> {
            Err(AgentError::ExecutionFailed("boom".into()))
        }
    }

    fn linear_graph() -> CompiledStateGraph<CountState> {
        let mut graph = StateGraph::<CountState>::new();
        graph
            .add_node("a", Arc::new(HopNode("a")))
            .add_node("b", Arc::new(HopNode("b")))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);
        graph.compile().unwrap()
    }

    #[tokio::test]
    async fn invoke_runs_linear_chain_in_order() {
        let out = linear_graph()
            .invoke(CountState::default(), None)
            .await
            .unwrap();
        assert_eq!(out.hops, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn invoke_propagates_node_failure() {
        let mut graph = StateGraph::<CountState>::new();
        graph
            .add_node("fail", Arc::new(FailNode))
            .add_edge(START, "fail")
            .add_edge("fail", END);
        let compiled = graph.compile().unwrap();
        let err = compiled.invoke(CountState::default(), None).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn conditional_loop_is_bounded_by_recursion_limit() {
        let mut graph = StateGraph::<CountState>::new();
        graph
            .add_node("a", Arc::new(HopNode("a")))
            .add_edge(START, "a")
            .add_conditional_edges("a", Arc::new(|_: &CountState| "a".to_string()), None);
        let compiled = graph.compile().unwrap();

        let config = RunnableConfig {
            recursion_limit: 5,
            ..Default::default()
        };
        let err = compiled
            .invoke(CountState::default(), Some(config))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::RecursionLimit(5)));
    }

    #[tokio::test]
    async fn conditional_route_to_end_stops_the_run() {
        let mut graph = StateGraph::<CountState>::new();
        graph
            .add_node("a", Arc::new(HopNode("a")))
            .add_edge(START, "a")
            .add_conditional_edges(
                "a",
                Arc::new(|s: &CountState| {
                    if s.hops.len() < 3 {
                        "a".to_string()
                    } else {
                        END.to_string()
                    }
                }),
                None,
            );
        let compiled = graph.compile().unwrap();
        let out = compiled.invoke(CountState::default(), None).await.unwrap();
        assert_eq!(out.hops, vec!["a", "a", "a"]);
    }

    #[tokio::test]
    async fn stream_ends_with_values_on_success() {
        use tokio_stream::StreamExt;

        let mut stream = linear_graph().stream(CountState::default(), None);
        let mut saw_values = false;
        let mut task_ids = Vec::new();
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::Values(s) => {
                    saw_values = true;
                    assert_eq!(s.hops, vec!["a", "b"]);
                }
                StreamEvent::TaskStart { node_id } => task_ids.push(node_id),
                _ => {}
            }
        }
        assert!(saw_values);
        assert_eq!(task_ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn stream_surfaces_failure_as_task_end_err() {
        use tokio_stream::StreamExt;

        let mut graph = StateGraph::<CountState>::new();
        graph
            .add_node("fail", Arc::new(FailNode))
            .add_edge(START, "fail")
            .add_edge("fail", END);
        let compiled = graph.compile().unwrap();

        let mut stream = compiled.stream(CountState::default(), None);
        let mut failure: Option<String> = None;
        let mut saw_values = false;
        while let Some(event) = stream.next().await {
            match event {
                StreamEvent::TaskEnd {
                    result: Err(msg), ..
                } => failure = Some(msg),
                StreamEvent::Values(_) => saw_values = true,
                _ => {}
            }
        }
        assert!(failure.unwrap().contains("boom"));
        assert!(!saw_values);
    }
}
