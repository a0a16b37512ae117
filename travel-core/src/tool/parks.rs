use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    ToolResult,
    model::{ParkAlerts, ParkQuery, ThingsToDo},
    provider::nps::NpsProvider,
    tool::{Tool, parse_args},
};

fn filter_properties() -> serde_json::Map<String, Value> {
    let props = json!({
        "park_code": { "type": "string", "description": "4-letter park code, e.g. \"yose\"" },
        "state_code": { "type": "string", "description": "2-letter state code, e.g. \"CA\"" },
        "limit": { "type": "integer", "default": 10, "description": "Number of results to return" }
    });
    match props {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

#[derive(Debug, Clone)]
pub struct ThingsToDoTool {
    provider: Arc<NpsProvider>,
}

impl ThingsToDoTool {
    pub fn new(provider: Arc<NpsProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for ThingsToDoTool {
    fn name(&self) -> &'static str {
        "get_things_to_do"
    }

    fn description(&self) -> &'static str {
        "Get suggested things to do in U.S. national parks."
    }

    fn parameters(&self) -> Value {
        let mut props = filter_properties();
        props.insert(
            "q".into(),
            json!({ "type": "string", "description": "Search term, e.g. \"camping\"" }),
        );
        props.insert(
            "sort".into(),
            json!({ "type": "string", "description": "Sort key, e.g. \"-relevanceScore\"" }),
        );
        json!({ "type": "object", "properties": props })
    }

    async fn call(&self, args: Value) -> Value {
        let result: ToolResult<ThingsToDo> = match parse_args::<ParkQuery>(args) {
            Ok(query) => self.provider.get_things_to_do(&query).await,
            Err(err) => Err(err).into(),
        };
        result.to_value()
    }
}

#[derive(Debug, Clone)]
pub struct AlertsTool {
    provider: Arc<NpsProvider>,
}

impl AlertsTool {
    pub fn new(provider: Arc<NpsProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for AlertsTool {
    fn name(&self) -> &'static str {
        "get_alerts"
    }

    fn description(&self) -> &'static str {
        "Get alerts (closures, cautions, danger notices) for parks or states."
    }

    fn parameters(&self) -> Value {
        json!({ "type": "object", "properties": filter_properties() })
    }

    async fn call(&self, args: Value) -> Value {
        let result: ToolResult<ParkAlerts> = match parse_args::<ParkQuery>(args) {
            Ok(query) => self.provider.get_alerts(&query).await,
            Err(err) => Err(err).into(),
        };
        result.to_value()
    }
}
