//! Named, typed callables handed to the orchestration runtime.
//!
//! Every tool takes a JSON object of arguments and answers with the
//! serialized [`ToolResult`] envelope. Nothing here ever fails outward:
//! bad arguments and unknown tool names become error envelopes too.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::{collections::BTreeMap, fmt::Debug, sync::Arc};
use tracing::{debug, warn};

use crate::{
    ToolResult,
    config::Config,
    error::ToolError,
    provider::{nps::NpsProvider, weatherapi::WeatherApiProvider},
};

pub mod parks;
pub mod search;
pub mod time;
pub mod weather;

pub use parks::{AlertsTool, ThingsToDoTool};
pub use search::{FlightQuery, NoSearchBackend, SearchBackend, WebSearch, WebSearchTool};
pub use time::{CurrentTimeTool, get_current_time};
pub use weather::{CurrentWeatherTool, WeatherForecastTool};

#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// Unique name the orchestrator calls the tool by.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the argument object.
    fn parameters(&self) -> Value;

    /// Run the tool. Always returns an envelope object.
    async fn call(&self, args: Value) -> Value;

    /// Function-call style definition for model requests.
    fn definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name(),
                "description": self.description(),
                "parameters": self.parameters(),
            }
        })
    }
}

/// Deserialize tool arguments; `null` is treated as an empty object.
pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args)
        .map_err(|err| ToolError::invalid_input(format!("Invalid arguments: {err}")))
}

/// Tools indexed by name.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every travel tool, wired from `config`.
    pub fn standard(config: &Config, search: Arc<dyn SearchBackend>) -> Self {
        let weather = Arc::new(WeatherApiProvider::from_config(config));
        let nps = Arc::new(NpsProvider::from_config(config));

        let mut registry = Self::new();
        registry.register(Arc::new(CurrentWeatherTool::new(weather.clone())));
        registry.register(Arc::new(WeatherForecastTool::new(weather)));
        registry.register(Arc::new(ThingsToDoTool::new(nps.clone())));
        registry.register(Arc::new(AlertsTool::new(nps)));
        registry.register(Arc::new(CurrentTimeTool));
        registry.register(Arc::new(WebSearchTool::new(WebSearch::new(search))));
        registry
    }

    /// Adds a tool, replacing any tool already registered under its name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Option<Arc<dyn Tool>> {
        let previous = self.tools.insert(tool.name(), tool);
        if let Some(previous) = &previous {
            warn!(tool = previous.name(), "replaced registered tool");
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn definitions(&self) -> Vec<Value> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub async fn call(&self, name: &str, args: Value) -> Value {
        match self.tools.get(name) {
            Some(tool) => {
                debug!(tool = name, "calling tool");
                tool.call(args).await
            }
            None => {
                warn!(tool = name, "call to unknown tool");
                ToolResult::<Value>::error(format!("Unknown tool '{name}'")).to_value()
            }
        }
    }
}
