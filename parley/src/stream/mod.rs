//! Internal streaming events emitted while a compiled graph runs.
//!
//! Nodes write these through [`RunContext`](crate::graph::RunContext);
//! the event translator in [`crate::events`] turns them into the outward
//! [`TurnEvent`](turn_event::TurnEvent) feed.

use std::fmt::Debug;

use serde_json::Value;

/// One chunk of streamed assistant text, exactly as produced by the model.
/// May contain tool-call markup; suppression happens at translation time.
#[derive(Clone, Debug)]
pub struct MessageChunk {
    pub content: String,
}

/// Metadata attached to streamed message chunks.
#[derive(Clone, Debug)]
pub struct StreamMetadata {
    /// Graph node id that produced the chunk.
    pub node: String,
}

/// Streamed event emitted while running a graph.
///
/// Within one run, events are totally ordered by production order.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after the run completes.
    Values(S),
    /// Message chunk emitted by a node (chat node streaming model output).
    Messages {
        chunk: MessageChunk,
        metadata: StreamMetadata,
    },
    /// A node began execution.
    TaskStart { node_id: String },
    /// A node finished execution; `Err` carries the failure message that
    /// terminated the run.
    TaskEnd {
        node_id: String,
        result: Result<(), String>,
    },
    /// The tools node is about to invoke a tool.
    ToolStart { name: String, arguments: Value },
    /// The tools node finished invoking a tool.
    ToolEnd { name: String, output: Value },
}
