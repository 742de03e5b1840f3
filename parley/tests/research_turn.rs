//! End-to-end research turns: web search dispatch, urls notices, system
//! prompt seeding, and provider-failure terminals.


use std::sync::Arc;

use async_trait::async_trait;
use tokio_stream::StreamExt;

use parley::{
    Message, MockLlm, ResearchAgent, SearchClient, SearchError, SearchResponse, SearchResult,
    TurnEvent,
};

struct FixedSearch(SearchResponse);

#[async_trait]
impl SearchClient for FixedSearch {
    async fn search(&self, _query: &str) -> Result<SearchResponse, SearchError> {
        Ok(self.0.clone())
    }
}

struct DownSearch;

#[async_trait]
impl SearchClient for DownSearch {
    async fn search(&self, _query: &str) -> Result<SearchResponse, SearchError> {
        Err(SearchError::Request("connection refused".to_string()))
    }
}

async fn collect(mut turn: tokio_stream::wrappers::ReceiverStream<TurnEvent>) -> Vec<TurnEvent> {
    let mut events = Vec::new();
    while let Some(event) = turn.next().await {
        events.push(event);
    }
    events
}

fn two_results() -> SearchResponse {
    SearchResponse {
        results: vec![
            SearchResult {
                url: "https://example.com/a".to_string(),
                title: "First".to_string(),
                content: "…".to_string(),
                score: 0.9,
            },
            SearchResult {
                url: "https://example.com/b".to_string(),
                title: "Second".to_string(),
                content: "…".to_string(),
                score: 0.7,
            },
        ],
    }
}

/// **Scenario**: the model calls `web_search`; the client sees a `search`
/// notice, a urls header, and one numbered line per result.
#[tokio::test]
async fn search_turn_reports_urls() {
    let call =
        r#"<tool_call>{"name": "web_search", "arguments": {"query": "rust agents"}}</tool_call>"#;
    let llm = Arc::new(MockLlm::script([call, "Here is what I found."]));
    let agent = ResearchAgent::new(
        llm,
        Arc::new(FixedSearch(two_results())),
        "You are a helpful assistant.",
    );

    let events = collect(agent.run_turn("find rust agent frameworks", "t1")).await;

    assert!(events
        .iter()
        .any(|e| matches!(e, TurnEvent::Search { content } if content == "🔎 Searching: rust agents")));

    let urls: Vec<&String> = events
        .iter()
        .filter_map(|e| match e {
            TurnEvent::Urls { content } => Some(content),
            _ => None,
        })
        .collect();
    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], "🌐 Top Search Results:");
    assert_eq!(urls[1], "1. First\n   https://example.com/a");
    assert_eq!(urls[2], "2. Second\n   https://example.com/b");

    assert_eq!(events.last().unwrap(), &TurnEvent::done());
}

/// **Scenario**: research turns seed the configured system prompt before
/// the user message.
#[tokio::test]
async fn system_prompt_precedes_user_message() {
    let llm = Arc::new(MockLlm::reply("ok"));
    let agent = ResearchAgent::new(
        llm.clone(),
        Arc::new(FixedSearch(SearchResponse::default())),
        "You are a research assistant.",
    );

    collect(agent.run_turn("question", "t1")).await;

    let seen = llm.seen_messages();
    assert!(matches!(&seen[0][0], Message::System(s) if s == "You are a research assistant."));
    assert!(matches!(&seen[0][1], Message::User(s) if s == "question"));
}

/// **Scenario**: the provider is down; the tool's failure propagates as the
/// turn's single `error` terminal.
#[tokio::test]
async fn provider_failure_ends_with_error() {
    let call = r#"<tool_call>{"name": "web_search", "arguments": {"query": "x"}}</tool_call>"#;
    let llm = Arc::new(MockLlm::reply(call));
    let agent = ResearchAgent::new(llm, Arc::new(DownSearch), "prompt");

    let events = collect(agent.run_turn("q", "t1")).await;

    let terminals: Vec<_> = events.iter().filter(|e| e.is_terminal()).collect();
    assert_eq!(terminals.len(), 1);
    match terminals[0] {
        TurnEvent::Error { error } => {
            assert!(error.contains("web_search"));
            assert!(error.contains("connection refused"));
        }
        other => panic!("expected error terminal, got {other:?}"),
    }
}

/// **Scenario**: a search that returns no results produces no urls events,
/// only the search notice.
#[tokio::test]
async fn empty_results_produce_no_urls_events() {
    let call = r#"<tool_call>{"name": "web_search", "arguments": {"query": "x"}}</tool_call>"#;
    let llm = Arc::new(MockLlm::script([call, "Nothing found."]));
    let agent = ResearchAgent::new(
        llm,
        Arc::new(FixedSearch(SearchResponse::default())),
        "prompt",
    );

    let events = collect(agent.run_turn("q", "t1")).await;
    assert!(events.iter().any(|e| e.kind() == "search"));
    assert!(!events.iter().any(|e| e.kind() == "urls"));
    assert_eq!(events.last().unwrap(), &TurnEvent::done());
}
