//! Errors raised inside tool adapters.
//!
//! These never leave an adapter: the public operations fold them into an
//! error [`ToolResult`](crate::ToolResult) whose message is the `Display` text.

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ToolError {
    /// A required secret is not configured.
    #[error("{0}")]
    MissingApiKey(&'static str),

    #[error("Forecast days must be between 1 and 10")]
    ForecastDays,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to send request to {service}: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status { service: &'static str, status: u16, body: String },

    #[error("Failed to parse {service} JSON: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Web search failed: {0}")]
    Search(String),
}

impl ToolError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// True for errors detected before any network call was attempted.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::MissingApiKey(_) | Self::ForecastDays | Self::InvalidInput(_))
    }

    /// Log a failed tool call. Caller mistakes go to debug, upstream faults to warn.
    pub(crate) fn log(&self, operation: &str, subject: &str) {
        if self.is_local() {
            debug!(operation, subject, error = %self, "tool call rejected");
        } else {
            warn!(operation, subject, error = %self, "tool call failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_envelope_contract() {
        assert_eq!(
            ToolError::MissingApiKey("Missing NPS API key").to_string(),
            "Missing NPS API key"
        );
        assert_eq!(ToolError::ForecastDays.to_string(), "Forecast days must be between 1 and 10");
    }

    #[test]
    fn status_error_mentions_service_and_code() {
        let err = ToolError::Status { service: "NPS API", status: 503, body: "down".into() };
        assert_eq!(err.to_string(), "NPS API request failed with status 503: down");
        assert!(!err.is_local());
    }

    #[test]
    fn validation_errors_are_local() {
        assert!(ToolError::ForecastDays.is_local());
        assert!(ToolError::invalid_input("bad").is_local());
        assert!(ToolError::MissingApiKey("Missing API key").is_local());
    }

    #[test]
    fn upstream_failures_are_not_local() {
        let err = ToolError::Search("engine down".into());
        assert!(!err.is_local());
        err.log("web_search", "flights to Lima");
    }
}
