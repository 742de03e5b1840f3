//! Per-run context handed to nodes: streaming sender and cancellation.

use std::fmt::Debug;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::stream::StreamEvent;

/// Run-scoped context injected into `Node::run_with_context`.
///
/// `stream_tx` is `None` for plain `invoke` runs. Nodes must check
/// [`RunContext::is_cancelled`] at every suspension point (between model
/// chunks, before and after tool invocation) so a disconnected consumer
/// stops work promptly.
pub struct RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Sender for internal stream events; `None` when not streaming.
    pub stream_tx: Option<mpsc::Sender<StreamEvent<S>>>,
    /// Cancelled when the downstream consumer goes away.
    pub cancel: CancellationToken,
}

impl<S> RunContext<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Context for non-streaming invocation: no sender, never cancelled
    /// externally.
    pub fn detached() -> Self {
        Self {
            stream_tx: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn new(stream_tx: mpsc::Sender<StreamEvent<S>>, cancel: CancellationToken) -> Self {
        Self {
            stream_tx: Some(stream_tx),
            cancel,
        }
    }

    /// Sends an event when streaming; send failures (receiver gone) are
    /// ignored; cancellation delivers the stop signal.
    pub async fn emit(&self, event: StreamEvent<S>) {
        if let Some(tx) = &self.stream_tx {
            let _ = tx.send(event).await;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
