//! Flight lookups through an external web-search capability.
//!
//! The search engine itself lives outside this crate; the orchestrator hands
//! one in as a [`SearchBackend`]. Results are passed through unshaped.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};
use std::{fmt::Debug, sync::Arc};

use crate::{
    ToolResult,
    error::ToolError,
    model::SearchResults,
    tool::{Tool, parse_args},
};

#[async_trait]
pub trait SearchBackend: Send + Sync + Debug {
    async fn search(&self, query: &str) -> anyhow::Result<Value>;
}

/// Placeholder used when no search engine has been wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearchBackend;

#[async_trait]
impl SearchBackend for NoSearchBackend {
    async fn search(&self, _query: &str) -> anyhow::Result<Value> {
        Err(anyhow::anyhow!("no search backend is configured"))
    }
}

/// A structured flight request rendered as a search phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub date: Option<NaiveDate>,
}

impl FlightQuery {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self { origin: origin.into(), destination: destination.into(), date: None }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// e.g. `flights from Hyderabad to Delhi on June 10`
    pub fn to_search_query(&self) -> String {
        let mut query =
            format!("flights from {} to {}", self.origin.trim(), self.destination.trim());
        if let Some(date) = self.date {
            query.push_str(&format!(" on {}", date.format("%B %-d")));
        }
        query
    }
}

#[derive(Debug, Clone)]
pub struct WebSearch {
    backend: Arc<dyn SearchBackend>,
}

impl WebSearch {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub async fn search(&self, query: &str) -> ToolResult<SearchResults> {
        let result = self.run(query).await;
        if let Err(err) = &result {
            err.log("web_search", query);
        }
        result.into()
    }

    pub async fn search_flights(&self, flight: &FlightQuery) -> ToolResult<SearchResults> {
        self.search(&flight.to_search_query()).await
    }

    async fn run(&self, query: &str) -> Result<SearchResults, ToolError> {
        if query.trim().is_empty() {
            return Err(ToolError::invalid_input("Search query must not be empty"));
        }

        let results = self
            .backend
            .search(query)
            .await
            .map_err(|err| ToolError::Search(format!("{err:#}")))?;

        Ok(SearchResults { query: query.to_owned(), results })
    }
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

#[derive(Debug, Clone)]
pub struct WebSearchTool {
    search: WebSearch,
}

impl WebSearchTool {
    pub fn new(search: WebSearch) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "Search the web, e.g. for flight options and ticket prices."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Free-text query, e.g. \"cheap flights to Paris in July\""
                }
            },
            "required": ["query"]
        })
    }

    async fn call(&self, args: Value) -> Value {
        let result: ToolResult<SearchResults> = match parse_args::<SearchArgs>(args) {
            Ok(args) => self.search.search(&args.query).await,
            Err(err) => Err(err).into(),
        };
        result.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingBackend {
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SearchBackend for RecordingBackend {
        async fn search(&self, query: &str) -> anyhow::Result<Value> {
            self.queries.lock().unwrap().push(query.to_owned());
            Ok(json!([{ "title": "HYD → DEL from $80" }]))
        }
    }

    #[test]
    fn flight_query_renders_search_phrase() {
        let date = NaiveDate::from_ymd_opt(2026, 6, 10).unwrap();
        let query = FlightQuery::new("Hyderabad", "Delhi").on(date);

        assert_eq!(query.to_search_query(), "flights from Hyderabad to Delhi on June 10");
        assert_eq!(FlightQuery::new("Oslo", "Rome").to_search_query(), "flights from Oslo to Rome");
    }

    #[tokio::test]
    async fn results_pass_through_untouched() {
        let backend = Arc::new(RecordingBackend::default());
        let search = WebSearch::new(backend.clone());

        let value = search.search_flights(&FlightQuery::new("Hyderabad", "Delhi")).await.to_value();

        assert_eq!(
            value,
            json!({
                "status": "success",
                "query": "flights from Hyderabad to Delhi",
                "results": [{ "title": "HYD → DEL from $80" }]
            })
        );
        assert_eq!(backend.queries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn query_reaches_backend_unchanged() {
        let backend = Arc::new(RecordingBackend::default());
        let value = WebSearch::new(backend.clone()).search("  flights to Lima ").await.to_value();

        assert_eq!(value["query"], "  flights to Lima ");
        assert_eq!(*backend.queries.lock().unwrap(), vec!["  flights to Lima ".to_string()]);
    }

    #[tokio::test]
    async fn empty_query_never_reaches_backend() {
        let backend = Arc::new(RecordingBackend::default());
        let result = WebSearch::new(backend.clone()).search("  ").await;

        assert_eq!(result.error_message(), Some("Search query must not be empty"));
        assert!(backend.queries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_becomes_error_envelope() {
        let tool = WebSearchTool::new(WebSearch::new(Arc::new(NoSearchBackend)));
        let value = tool.call(json!({ "query": "flights to Lima" })).await;

        assert_eq!(
            value,
            json!({
                "status": "error",
                "error": "Web search failed: no search backend is configured"
            })
        );
    }
}
