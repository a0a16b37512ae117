use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    ToolResult,
    config::Config,
    error::ToolError,
    model::{ParkAlerts, ParkQuery, ThingsToDo},
    provider::{ServiceId, get_json},
};

const MISSING_KEY: &str = "Missing NPS API key";

/// Adapter over the National Park Service `thingstodo` and `alerts` endpoints.
#[derive(Debug, Clone)]
pub struct NpsProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl NpsProvider {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key(ServiceId::NationalParks).map(str::to_owned),
            config.base_url(ServiceId::NationalParks),
        )
    }

    pub async fn get_things_to_do(&self, query: &ParkQuery) -> ToolResult<ThingsToDo> {
        let result = self
            .fetch("thingstodo", query, true)
            .await
            .map(|page| ThingsToDo { things_to_do: page.data, total: page.total });
        if let Err(err) = &result {
            err.log("get_things_to_do", &format!("{query:?}"));
        }
        result.into()
    }

    /// Alerts ignore `q` and `sort`; only park, state and limit are sent.
    pub async fn get_alerts(&self, query: &ParkQuery) -> ToolResult<ParkAlerts> {
        let result = self
            .fetch("alerts", query, false)
            .await
            .map(|page| ParkAlerts { alerts: page.data, total: page.total });
        if let Err(err) = &result {
            err.log("get_alerts", &format!("{query:?}"));
        }
        result.into()
    }

    async fn fetch(
        &self,
        endpoint: &str,
        query: &ParkQuery,
        with_search: bool,
    ) -> Result<Page, ToolError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ToolError::MissingApiKey(MISSING_KEY))?;

        let mut params = vec![("limit", query.limit.to_string()), ("api_key", key.to_owned())];
        push_filter(&mut params, "parkCode", &query.park_code);
        push_filter(&mut params, "stateCode", &query.state_code);
        if with_search {
            push_filter(&mut params, "q", &query.q);
            push_filter(&mut params, "sort", &query.sort);
        }

        let url = format!("{}/{endpoint}", self.base_url);
        let parsed: NpsResponse =
            get_json(&self.http, ServiceId::NationalParks, &url, &params).await?;

        Ok(Page {
            data: parsed.data.unwrap_or_default(),
            total: total_count(parsed.total.as_ref()),
        })
    }
}

/// Adds a filter only when the caller supplied a non-blank value.
fn push_filter(
    params: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: &Option<String>,
) {
    if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        params.push((name, value.to_owned()));
    }
}

/// The NPS API reports `total` as a numeric string; accept numbers as well.
fn total_count(total: Option<&Value>) -> u64 {
    match total {
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

struct Page {
    data: Vec<Value>,
    total: u64,
}

#[derive(Debug, Deserialize)]
struct NpsResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    total: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn total_accepts_numbers_and_numeric_strings() {
        assert_eq!(total_count(Some(&json!(7))), 7);
        assert_eq!(total_count(Some(&json!("42"))), 42);
        assert_eq!(total_count(Some(&json!("n/a"))), 0);
        assert_eq!(total_count(None), 0);
    }

    #[test]
    fn blank_filters_are_not_sent() {
        let mut params = Vec::new();
        push_filter(&mut params, "parkCode", &Some("  ".into()));
        push_filter(&mut params, "stateCode", &None);
        push_filter(&mut params, "q", &Some("camping".into()));

        assert_eq!(params, vec![("q", "camping".to_string())]);
    }

    #[test]
    fn null_data_reads_as_empty() {
        let parsed: NpsResponse =
            serde_json::from_str(r#"{"data":null,"total":"0"}"#).expect("parse");
        assert_eq!(parsed.data.unwrap_or_default(), Vec::<Value>::new());
    }

    #[tokio::test]
    async fn missing_key_wins_over_any_filter() {
        let nps = NpsProvider::new(None, "http://127.0.0.1:9");
        let query = ParkQuery { q: Some("hiking".into()), ..ParkQuery::park("yose") };

        let todo = nps.get_things_to_do(&query).await;
        let alerts = nps.get_alerts(&ParkQuery::default()).await;

        assert_eq!(todo.error_message(), Some("Missing NPS API key"));
        assert_eq!(alerts.error_message(), Some("Missing NPS API key"));
    }
}
