//! Event stream translation: internal graph events → outward turn events.
//!
//! One turn produces the ordered feed `user, start, token*, …` terminated by
//! exactly one of `done` or `error`. Tool-call markup is stripped from
//! tokens by the [`TokenGate`]; tool invocations surface as `search` and
//! `urls` notices. Dropping the returned stream cancels the underlying run
//! at its next suspension point.

mod gate;

pub use gate::TokenGate;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use turn_event::TurnEvent;

use crate::graph::CompiledStateGraph;
use crate::memory::{CheckpointError, Checkpointer, RunnableConfig};
use crate::message::Message;
use crate::state::ChatState;
use crate::stream::StreamEvent;

/// Bounded buffer for outward events; prevents unbounded growth when the
/// transport cannot keep up.
const EVENT_QUEUE_CAPACITY: usize = 128;

/// Inputs for one streamed turn.
pub struct TurnRequest {
    pub compiled: CompiledStateGraph<ChatState>,
    pub checkpointer: Arc<dyn Checkpointer<ChatState>>,
    pub config: RunnableConfig,
    pub system_prompt: Option<String>,
    pub user_input: String,
}

/// Runs one turn in a spawned task and returns its outward event stream.
///
/// The producer checks for consumer disconnect at every send; once the
/// receiver is dropped, the graph run is cancelled and no further events are
/// produced. Completed tool invocations are not rolled back.
pub fn stream_turn(request: TurnRequest) -> ReceiverStream<TurnEvent> {
    let (tx, rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    tokio::spawn(run_turn_task(request, tx));
    ReceiverStream::new(rx)
}

/// A turn that failed before the graph could run (e.g. graph compilation).
/// Still honors the wire contract: `user, start, error`.
pub fn failed_turn(user_input: String, message: String) -> ReceiverStream<TurnEvent> {
    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        let _ = tx.send(TurnEvent::user(user_input)).await;
        let _ = tx.send(TurnEvent::start()).await;
        let _ = tx.send(TurnEvent::error(message)).await;
    });
    ReceiverStream::new(rx)
}

async fn run_turn_task(request: TurnRequest, tx: mpsc::Sender<TurnEvent>) {
    let cancel = CancellationToken::new();
    let send = |event: TurnEvent| {
        let tx = tx.clone();
        let cancel = cancel.clone();
        async move {
            if tx.send(event).await.is_err() {
                cancel.cancel();
                return false;
            }
            true
        }
    };

    if !send(TurnEvent::user(request.user_input.clone())).await {
        return;
    }
    if !send(TurnEvent::start()).await {
        return;
    }

    let state = match initial_state(
        request.checkpointer.as_ref(),
        &request.config,
        request.system_prompt.as_deref(),
        &request.user_input,
    )
    .await
    {
        Ok(state) => state,
        Err(e) => {
            send(TurnEvent::error(e.to_string())).await;
            return;
        }
    };

    let mut inner = request.compiled.stream_with_cancel(
        state,
        Some(request.config),
        cancel.child_token(),
    );
    let mut gate = TokenGate::new();
    while let Some(event) = inner.next().await {
        match event {
            StreamEvent::Messages { chunk, .. } => {
                let visible = gate.feed(&chunk.content);
                if !visible.is_empty() && !send(TurnEvent::token(visible)).await {
                    return;
                }
            }
            StreamEvent::TaskEnd {
                node_id,
                result: Ok(()),
            } if node_id == "chat" => {
                let tail = gate.flush();
                if !tail.is_empty() && !send(TurnEvent::token(tail)).await {
                    return;
                }
            }
            StreamEvent::TaskEnd {
                result: Err(message),
                ..
            } => {
                send(TurnEvent::error(message)).await;
                return;
            }
            StreamEvent::ToolStart { arguments, .. } => {
                let query = tool_query(&arguments);
                if !send(TurnEvent::search(format!("🔎 Searching: {query}"))).await {
                    return;
                }
            }
            StreamEvent::ToolEnd { output, .. } => {
                for line in url_lines(&output) {
                    if !send(TurnEvent::urls(line)).await {
                        return;
                    }
                }
            }
            _ => {}
        }
    }

    send(TurnEvent::done()).await;
}

/// Resumes a checkpointed thread by appending the new user message, or
/// starts fresh with the optional system prompt.
async fn initial_state(
    checkpointer: &dyn Checkpointer<ChatState>,
    config: &RunnableConfig,
    system_prompt: Option<&str>,
    user_input: &str,
) -> Result<ChatState, CheckpointError> {
    if config.thread_id.is_some() {
        if let Some(mut state) = checkpointer.get(config).await? {
            state.messages.push(Message::user(user_input));
            return Ok(state);
        }
    }
    Ok(ChatState::new_turn(system_prompt, user_input))
}

/// The query a tool was started with, for the `search` notice.
fn tool_query(arguments: &Value) -> String {
    arguments
        .get("query")
        .or_else(|| arguments.get("input"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `urls` notice lines for a tool result that carries url-bearing `results`.
/// Empty for tools that report no urls (e.g. retrieval).
fn url_lines(output: &Value) -> Vec<String> {
    let Some(results) = output.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut lines: Vec<String> = Vec::new();
    for (i, result) in results.iter().enumerate() {
        let Some(url) = result.get("url").and_then(Value::as_str) else {
            continue;
        };
        if url.is_empty() {
            continue;
        }
        let title = result.get("title").and_then(Value::as_str).unwrap_or("");
        lines.push(format!("{}. {}\n   {}", i + 1, title, url));
    }
    if !lines.is_empty() {
        lines.insert(0, "🌐 Top Search Results:".to_string());
    }
    lines
}
