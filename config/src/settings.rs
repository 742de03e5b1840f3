//! Typed runtime settings read from the environment with defaults.

use std::path::PathBuf;

use crate::LoadError;

/// System prompt seeded into research turns when none is configured.
pub const DEFAULT_RESEARCH_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Your name is Parkky. \
     Dont use include_domains argument during search.";

/// Runtime settings for agents, index lifecycle, and search.
///
/// Read once via [`Settings::from_env`] after [`crate::load_and_apply`].
/// Environment keys and defaults:
///
/// | Key                             | Default       |
/// |---------------------------------|---------------|
/// | `PARLEY_DATA_DIR`               | `./data`      |
/// | `PARLEY_STORE_DIR`              | `./store_rag` |
/// | `PARLEY_RETRIEVAL_TOP_K`        | `4`           |
/// | `PARLEY_SEARCH_MAX_RESULTS`     | `4`           |
/// | `TAVILY_API_KEY`                | unset         |
/// | `PARLEY_RESEARCH_SYSTEM_PROMPT` | built-in      |
#[derive(Clone, Debug)]
pub struct Settings {
    /// Directory of source documents for the knowledge index.
    pub data_dir: PathBuf,
    /// Directory where the built index is persisted.
    pub store_dir: PathBuf,
    /// Number of nodes returned per retrieval query.
    pub retrieval_top_k: usize,
    /// Maximum results requested from the web search provider.
    pub search_max_results: usize,
    /// API key for the web search provider, when configured.
    pub search_api_key: Option<String>,
    /// System prompt seeded into research turns.
    pub research_system_prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            store_dir: PathBuf::from("./store_rag"),
            retrieval_top_k: 4,
            search_max_results: 4,
            search_api_key: None,
            research_system_prompt: DEFAULT_RESEARCH_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, LoadError> {
        let mut settings = Self::default();
        if let Ok(v) = std::env::var("PARLEY_DATA_DIR") {
            settings.data_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("PARLEY_STORE_DIR") {
            settings.store_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("PARLEY_RETRIEVAL_TOP_K") {
            settings.retrieval_top_k = parse_usize("PARLEY_RETRIEVAL_TOP_K", &v)?;
        }
        if let Ok(v) = std::env::var("PARLEY_SEARCH_MAX_RESULTS") {
            settings.search_max_results = parse_usize("PARLEY_SEARCH_MAX_RESULTS", &v)?;
        }
        if let Ok(v) = std::env::var("TAVILY_API_KEY") {
            if !v.is_empty() {
                settings.search_api_key = Some(v);
            }
        }
        if let Ok(v) = std::env::var("PARLEY_RESEARCH_SYSTEM_PROMPT") {
            settings.research_system_prompt = v;
        }
        Ok(settings)
    }
}

fn parse_usize(key: &str, value: &str) -> Result<usize, LoadError> {
    value.parse().map_err(|_| LoadError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
