//! Index lifecycle: load-or-build at startup, exclusive rebuild, atomic
//! swap of the active instance together with its tool set.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, warn};

use env_config::Settings;

use crate::index::{IndexError, IndexQuery, Indexer, RetrievalTool};
use crate::tools::ToolRegistry;

/// The active instance and the tool set derived from it. Replaced as one
/// unit under the write lock; never mutated in place.
struct ActiveIndex {
    index: Option<Arc<dyn IndexQuery>>,
    tools: Arc<ToolRegistry>,
}

impl ActiveIndex {
    fn empty() -> Self {
        Self {
            index: None,
            tools: Arc::new(ToolRegistry::new()),
        }
    }
}

/// Owns the only live index instance and serializes rebuilds against it.
///
/// Queries (through the registry from [`IndexManager::current_tools`]) never
/// take the rebuild lock: a rebuild constructs the new instance off to the
/// side and publishes it with one short write-lock swap, so readers always
/// see either the old complete instance or the new one.
pub struct IndexManager<I: Indexer> {
    data_dir: PathBuf,
    store_dir: PathBuf,
    indexer: I,
    top_k: usize,
    active: RwLock<ActiveIndex>,
    /// Exclusive section: at most one rebuild in flight.
    reload_lock: Mutex<()>,
}

impl<I: Indexer> IndexManager<I> {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        store_dir: impl Into<PathBuf>,
        indexer: I,
        top_k: usize,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            store_dir: store_dir.into(),
            indexer,
            top_k,
            active: RwLock::new(ActiveIndex::empty()),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn from_settings(settings: &Settings, indexer: I) -> Self {
        Self::new(
            settings.data_dir.clone(),
            settings.store_dir.clone(),
            indexer,
            settings.retrieval_top_k,
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The underlying document/index subsystem.
    pub fn indexer(&self) -> &I {
        &self.indexer
    }

    /// Startup: load the persisted index when storage exists and is
    /// non-empty, otherwise build from the current documents. Exactly one of
    /// the two happens.
    pub async fn load_or_build(&self) -> Result<(), IndexError> {
        let _guard = self.reload_lock.lock().await;
        if store_present(&self.store_dir) {
            let index = self.indexer.load(&self.store_dir).await?;
            self.publish(Some(Arc::new(index))).await;
            info!("index loaded from {}", self.store_dir.display());
            Ok(())
        } else {
            self.rebuild_unlocked().await
        }
    }

    /// Rebuilds from the current documents, holding the exclusive section
    /// for the duration; at most one rebuild runs at a time.
    pub async fn rebuild(&self) -> Result<(), IndexError> {
        let _guard = self.reload_lock.lock().await;
        self.rebuild_unlocked().await
    }

    /// Externally triggered [`IndexManager::rebuild`] with fail-safe
    /// semantics: a failure leaves the previous active instance serving and
    /// is only logged. Safe to call concurrently.
    pub async fn reload(&self) {
        match self.rebuild().await {
            Ok(()) => info!("index reloaded"),
            Err(e) => error!("index reload failed: {e}"),
        }
    }

    /// Re-reads all documents and swaps in a freshly built instance. No
    /// documents yields the explicit empty state (no index, no tools).
    ///
    /// Callers must hold `reload_lock`.
    async fn rebuild_unlocked(&self) -> Result<(), IndexError> {
        let documents = self.indexer.load_documents(&self.data_dir).await?;
        if documents.is_empty() {
            warn!("no documents to index in {}", self.data_dir.display());
            self.publish(None).await;
            return Ok(());
        }
        let index = self.indexer.build(documents).await?;
        self.indexer.persist(&index, &self.store_dir).await?;
        self.publish(Some(Arc::new(index))).await;
        info!("index rebuilt and persisted to {}", self.store_dir.display());
        Ok(())
    }

    /// The tool set bound to the currently active instance. A query issued
    /// mid-reload is served by the last successfully published instance.
    pub async fn current_tools(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.active.read().await.tools)
    }

    pub async fn has_index(&self) -> bool {
        self.active.read().await.index.is_some()
    }

    async fn publish(&self, index: Option<Arc<dyn IndexQuery>>) {
        let mut tools = ToolRegistry::new();
        if let Some(index) = &index {
            tools.register(Arc::new(RetrievalTool::new(Arc::clone(index), self.top_k)));
        }
        let mut active = self.active.write().await;
        *active = ActiveIndex {
            index,
            tools: Arc::new(tools),
        };
    }
}

fn store_present(store_dir: &Path) -> bool {
    std::fs::read_dir(store_dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
