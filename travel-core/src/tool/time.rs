use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use serde_json::{Value, json};

use crate::{ToolResult, model::CurrentTime, tool::Tool};

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local date and time, used to ground "next week" style phrases.
pub fn get_current_time() -> ToolResult<CurrentTime> {
    ToolResult::success(current_time_at(&Local::now()))
}

pub fn current_time_at<Tz: TimeZone>(now: &DateTime<Tz>) -> CurrentTime
where
    Tz::Offset: std::fmt::Display,
{
    CurrentTime {
        current_time: now.format(TIME_FORMAT).to_string(),
        weekday: now.format("%A").to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentTimeTool;

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    fn description(&self) -> &'static str {
        "Return the current date and time so relative dates can be resolved."
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn call(&self, _args: Value) -> Value {
        get_current_time().to_value()
    }
}
