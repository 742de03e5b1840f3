//! Knowledge index: the traits the document/index subsystem is consumed
//! through, the lifecycle manager, and the retrieval tool derived from the
//! active instance.
//!
//! The index proper (embedding, similarity) is a black box behind
//! [`Indexer`] / [`IndexQuery`]; [`KeywordIndexer`] is the built-in
//! implementation so the crate runs and tests without an ML stack.
//! [`IndexManager`] owns the only live instance and swaps it wholesale on
//! rebuild, so queries always observe a single, fully built snapshot.

mod manager;
mod memory_index;
mod retrieval_tool;

pub use manager::IndexManager;
pub use memory_index::{KeywordIndexer, MemoryIndex};
pub use retrieval_tool::{RetrievalTool, RETRIEVAL_TOOL_NAME};

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from document loading, index build/persist/load, and queries.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("load documents: {0}")]
    LoadDocuments(String),
    #[error("build index: {0}")]
    Build(String),
    #[error("persist index: {0}")]
    Persist(String),
    #[error("load index: {0}")]
    Load(String),
    #[error("query index: {0}")]
    Query(String),
}

/// One source document read from the data directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Document {
    /// File name relative to the data directory.
    pub file_name: String,
    /// Location hint within the source (e.g. a page label), when known.
    pub page_label: Option<String>,
    pub text: String,
}

/// One scored retrieval hit.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoredNode {
    pub text: String,
    pub score: f32,
    pub file_name: String,
    pub page_label: Option<String>,
}

/// Read-only view of one fully built index instance.
///
/// Instances are immutable; a rebuild produces a new instance rather than
/// mutating this one, so concurrent queries never observe a partial index.
#[async_trait]
pub trait IndexQuery: Send + Sync {
    /// Returns up to `top_k` nodes most relevant to `text`, best first.
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredNode>, IndexError>;
}

/// The document/index subsystem consumed by [`IndexManager`].
#[async_trait]
pub trait Indexer: Send + Sync + 'static {
    type Index: IndexQuery + Send + Sync + 'static;

    /// Reads all source documents under `dir`. A missing directory yields an
    /// empty set, not an error; an unreadable file is an error.
    async fn load_documents(&self, dir: &Path) -> Result<Vec<Document>, IndexError>;

    /// Builds a fresh index instance from the documents.
    async fn build(&self, documents: Vec<Document>) -> Result<Self::Index, IndexError>;

    /// Persists the instance under `dir` for [`Indexer::load`] at next startup.
    async fn persist(&self, index: &Self::Index, dir: &Path) -> Result<(), IndexError>;

    /// Loads the persisted instance from `dir`.
    async fn load(&self, dir: &Path) -> Result<Self::Index, IndexError>;
}
