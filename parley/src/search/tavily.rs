//! Tavily search client over HTTP.

use async_trait::async_trait;
use serde_json::json;

use env_config::Settings;

use crate::search::{SearchClient, SearchError, SearchResponse};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// [`SearchClient`] backed by the Tavily search API.
pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
    max_results: usize,
    topic: String,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            max_results: 4,
            topic: "general".to_string(),
        }
    }

    /// Builds a client from settings; `None` when no API key is configured.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        let api_key = settings.search_api_key.clone()?;
        Some(Self::new(api_key).with_max_results(settings.search_max_results))
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    fn request_body(&self, query: &str) -> serde_json::Value {
        json!({
            "api_key": self.api_key,
            "query": query,
            "max_results": self.max_results,
            "topic": self.topic,
        })
    }
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .post(TAVILY_ENDPOINT)
            .json(&self.request_body(query))
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SearchError::Provider(format!(
                "status {}",
                response.status()
            )));
        }
        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::Provider(format!("decode response: {e}")))
    }
}
