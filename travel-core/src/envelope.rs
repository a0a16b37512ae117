use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ToolError;

/// Uniform result returned by every tool.
///
/// Serializes as `{"status": "success", ...payload}` or
/// `{"status": "error", "error": "<message>"}`. The success payload must
/// serialize as a JSON object so its fields can sit beside `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult<T> {
    Success(T),
    Error { error: String },
}

impl<T> ToolResult<T> {
    pub fn success(payload: T) -> Self {
        Self::Success(payload)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { error: message.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { error } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::Error { error } => Err(error),
        }
    }
}

impl<T: Serialize> ToolResult<T> {
    /// Serialize into the JSON object handed back to the orchestrator.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|err| {
            json!({ "status": "error", "error": format!("Failed to serialize tool result: {err}") })
        })
    }
}

impl<T> From<Result<T, ToolError>> for ToolResult<T> {
    fn from(result: Result<T, ToolError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::error(err.to_string()),
        }
    }
}
