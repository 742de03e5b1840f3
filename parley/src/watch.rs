//! Change trigger adapter: debounced filesystem watching of the data
//! directory, driving [`IndexManager::reload`].
//!
//! The watcher never touches the index itself; it is purely a caller of
//! the manager's reload entry point. Bursts of editor writes are debounced,
//! and triggers that arrive while a reload is queued are coalesced.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::index::{IndexManager, Indexer};

/// Default debounce window for file-change bursts.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Errors that can occur when starting the watcher.
#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("failed to create file watcher: {0}")]
    Init(String),

    #[error("failed to watch path {path}: {error}")]
    Watch { path: PathBuf, error: String },
}

/// Handle to a running watcher. Dropping it stops watching; the reload task
/// drains and exits.
pub struct IndexWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
}

impl IndexWatcher {
    /// Starts watching the manager's data directory with the default
    /// debounce window.
    pub fn spawn<I: Indexer>(manager: Arc<IndexManager<I>>) -> Result<Self, WatcherError> {
        Self::spawn_with_debounce(manager, Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Starts watching with a custom debounce window.
    ///
    /// Must be called from within a tokio runtime; the reload loop runs as a
    /// spawned task. The trigger channel has capacity 1 so change bursts
    /// collapse into at most one queued reload.
    pub fn spawn_with_debounce<I: Indexer>(
        manager: Arc<IndexManager<I>>,
        debounce: Duration,
    ) -> Result<Self, WatcherError> {
        let data_dir = manager.data_dir().to_path_buf();
        let (trigger_tx, mut trigger_rx) = mpsc::channel::<()>(1);

        let mut debouncer = new_debouncer(debounce, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    debug!("file change detected ({} events)", events.len());
                    // Full means a reload is already queued; coalesce.
                    let _ = trigger_tx.try_send(());
                }
                Err(e) => error!("file watcher error: {e:?}"),
            }
        })
        .map_err(|e| WatcherError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&data_dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatcherError::Watch {
                path: data_dir.clone(),
                error: e.to_string(),
            })?;

        tokio::spawn(async move {
            while trigger_rx.recv().await.is_some() {
                manager.reload().await;
            }
            debug!("index watcher task exiting");
        });

        info!("watching {} for document changes", data_dir.display());
        Ok(Self {
            _debouncer: debouncer,
        })
    }
}
