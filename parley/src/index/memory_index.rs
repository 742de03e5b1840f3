//! Built-in keyword index: word-chunked documents scored by term overlap,
//! persisted as JSON.

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::index::{Document, IndexError, IndexQuery, Indexer, ScoredNode};

const STORE_FILE: &str = "index.json";

#[derive(Clone, Debug, Serialize, Deserialize)]
struct StoredNode {
    file_name: String,
    page_label: Option<String>,
    text: String,
}

/// In-memory index over word chunks; scoring is term overlap normalized by
/// chunk length.
pub struct MemoryIndex {
    nodes: Vec<StoredNode>,
    terms: Vec<HashSet<String>>,
}

impl MemoryIndex {
    fn from_nodes(nodes: Vec<StoredNode>) -> Self {
        let terms = nodes.iter().map(|n| tokenize(&n.text)).collect();
        Self { nodes, terms }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[async_trait]
impl IndexQuery for MemoryIndex {
    async fn query(&self, text: &str, top_k: usize) -> Result<Vec<ScoredNode>, IndexError> {
        let query_terms = tokenize(text);
        if query_terms.is_empty() {
            return Ok(Vec::new());
        }
        let mut scored: Vec<(f32, &StoredNode)> = self
            .nodes
            .iter()
            .zip(&self.terms)
            .filter_map(|(node, terms)| {
                let overlap = query_terms.intersection(terms).count();
                if overlap == 0 {
                    return None;
                }
                let score = overlap as f32 / (terms.len().max(1) as f32).sqrt();
                Some((score, node))
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored
            .into_iter()
            .map(|(score, node)| ScoredNode {
                text: node.text.clone(),
                score,
                file_name: node.file_name.clone(),
                page_label: node.page_label.clone(),
            })
            .collect())
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Built-in [`Indexer`]: plain-text documents, word chunking with overlap,
/// JSON persistence. Swap in a real vector indexer for semantic retrieval.
pub struct KeywordIndexer {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for KeywordIndexer {
    fn default() -> Self {
        Self {
            chunk_size: 256,
            chunk_overlap: 50,
        }
    }
}

impl KeywordIndexer {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            chunk_overlap: chunk_overlap.min(chunk_size.max(1) - 1),
        }
    }

    fn chunk(&self, document: &Document) -> Vec<StoredNode> {
        let words: Vec<&str> = document.text.split_whitespace().collect();
        if words.is_empty() {
            return Vec::new();
        }
        let step = self.chunk_size - self.chunk_overlap;
        let mut nodes = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.chunk_size).min(words.len());
            nodes.push(StoredNode {
                file_name: document.file_name.clone(),
                page_label: document.page_label.clone(),
                text: words[start..end].join(" "),
            });
            if end == words.len() {
                break;
            }
            start += step;
        }
        nodes
    }
}

#[async_trait]
impl Indexer for KeywordIndexer {
    type Index = MemoryIndex;

    async fn load_documents(&self, dir: &Path) -> Result<Vec<Document>, IndexError> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut documents = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry =
                entry.map_err(|e| IndexError::LoadDocuments(format!("walk {dir:?}: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry
                .path()
                .strip_prefix(dir)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .to_string();
            let text = std::fs::read_to_string(entry.path())
                .map_err(|e| IndexError::LoadDocuments(format!("read {file_name}: {e}")))?;
            documents.push(Document {
                file_name,
                page_label: None,
                text,
            });
        }
        Ok(documents)
    }

    async fn build(&self, documents: Vec<Document>) -> Result<Self::Index, IndexError> {
        let nodes: Vec<StoredNode> = documents.iter().flat_map(|d| self.chunk(d)).collect();
        Ok(MemoryIndex::from_nodes(nodes))
    }

    async fn persist(&self, index: &Self::Index, dir: &Path) -> Result<(), IndexError> {
        std::fs::create_dir_all(dir).map_err(|e| IndexError::Persist(e.to_string()))?;
        let json = serde_json::to_string(&index.nodes)
            .map_err(|e| IndexError::Persist(e.to_string()))?;
        std::fs::write(dir.join(STORE_FILE), json).map_err(|e| IndexError::Persist(e.to_string()))
    }

    async fn load(&self, dir: &Path) -> Result<Self::Index, IndexError> {
        let json = std::fs::read_to_string(dir.join(STORE_FILE))
            .map_err(|e| IndexError::Load(e.to_string()))?;
        let nodes: Vec<StoredNode> =
            serde_json::from_str(&json).map_err(|e| IndexError::Load(e.to_string()))?;
        Ok(MemoryIndex::from_nodes(nodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(file_name: &str, text: &str) -> Document {
        Document {
            file_name: file_name.to_string(),
            page_label: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn query_ranks_matching_chunk_first() {
        let indexer = KeywordIndexer::default();
        let index = indexer
            .build(vec![
                doc("cats.txt", "cats purr and chase mice around the house"),
                doc("rust.txt", "rust is a systems programming language"),
            ])
            .await
            .unwrap();

        let hits = index.query("what language is rust", 4).await.unwrap();
        assert!(!hits.is_empty());
        assert_eq!(hits[0].file_name, "rust.txt");
    }

    #[tokio::test]
    async fn query_with_no_overlap_returns_nothing() {
        let indexer = KeywordIndexer::default();
        let index = indexer
            .build(vec![doc("a.txt", "alpha beta gamma")])
            .await
            .unwrap();
        let hits = index.query("zzz qqq", 4).await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn chunking_overlaps_and_covers_all_words() {
        let indexer = KeywordIndexer::new(4, 1);
        let words: Vec<String> = (0..10).map(|i| format!("w{i}")).collect();
        let index = indexer
            .build(vec![doc("long.txt", &words.join(" "))])
            .await
            .unwrap();
        // step = 3: chunks start at 0, 3, 6; the last one reaches the end
        assert_eq!(index.len(), 3);
        let hits = index.query("w9", 4).await.unwrap();
        assert!(!hits.is_empty());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let indexer = KeywordIndexer::default();
        let index = indexer
            .build(vec![doc("a.txt", "needle in a haystack")])
            .await
            .unwrap();
        indexer.persist(&index, dir.path()).await.unwrap();

        let loaded = indexer.load(dir.path()).await.unwrap();
        assert_eq!(loaded.len(), index.len());
        let hits = loaded.query("needle", 4).await.unwrap();
        assert_eq!(hits[0].file_name, "a.txt");
    }

    #[tokio::test]
    async fn load_documents_reads_files_and_skips_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.txt"), "first file").unwrap();
        std::fs::write(dir.path().join("two.txt"), "second file").unwrap();

        let indexer = KeywordIndexer::default();
        let docs = indexer.load_documents(dir.path()).await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].file_name, "one.txt");

        let missing = dir.path().join("nope");
        assert!(indexer.load_documents(&missing).await.unwrap().is_empty());
    }
}
