//! Declarative agent descriptors.
//!
//! Descriptors carry no behavior. They are configuration for an external
//! orchestration runtime, which routes user requests between the agents
//! using the natural-language instructions below.

use anyhow::{Result, anyhow, bail};
use serde_json::{Value, json};
use std::{collections::HashSet, sync::Arc};

use crate::tool::{Tool, ToolRegistry};

#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    name: String,
    model: String,
    description: String,
    instruction: String,
    tools: Vec<Arc<dyn Tool>>,
    /// Agents the runtime may call like a tool, getting their answer back.
    agent_tools: Vec<Arc<AgentDescriptor>>,
    /// Agents the runtime may hand the conversation over to.
    sub_agents: Vec<Arc<AgentDescriptor>>,
}

impl AgentDescriptor {
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn agent_tools(&self) -> &[Arc<AgentDescriptor>] {
        &self.agent_tools
    }

    pub fn sub_agents(&self) -> &[Arc<AgentDescriptor>] {
        &self.sub_agents
    }

    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Depth-first lookup of this agent or any agent reachable from it.
    pub fn find(&self, name: &str) -> Option<&AgentDescriptor> {
        if self.name == name {
            return Some(self);
        }
        self.sub_agents
            .iter()
            .chain(&self.agent_tools)
            .find_map(|agent| agent.find(name))
    }

    /// JSON view of the whole agent tree.
    pub fn manifest(&self) -> Value {
        json!({
            "name": self.name,
            "model": self.model,
            "description": self.description,
            "instruction": self.instruction,
            "tools": self.tools.iter().map(|t| t.definition()).collect::<Vec<_>>(),
            "agent_tools": self.agent_tools.iter().map(|a| a.manifest()).collect::<Vec<_>>(),
            "sub_agents": self.sub_agents.iter().map(|a| a.manifest()).collect::<Vec<_>>(),
        })
    }
}

#[derive(Debug)]
pub struct AgentBuilder {
    name: String,
    model: String,
    description: String,
    instruction: String,
    tools: Vec<Arc<dyn Tool>>,
    agent_tools: Vec<Arc<AgentDescriptor>>,
    sub_agents: Vec<Arc<AgentDescriptor>>,
}

impl AgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: crate::config::DEFAULT_MODEL.to_string(),
            description: String::new(),
            instruction: String::new(),
            tools: Vec::new(),
            agent_tools: Vec::new(),
            sub_agents: Vec::new(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn agent_tool(mut self, agent: Arc<AgentDescriptor>) -> Self {
        self.agent_tools.push(agent);
        self
    }

    pub fn sub_agent(mut self, agent: Arc<AgentDescriptor>) -> Self {
        self.sub_agents.push(agent);
        self
    }

    pub fn build(self) -> Result<AgentDescriptor> {
        if self.name.trim().is_empty() {
            bail!("Agent name must not be empty");
        }

        // Agent tools share the callable namespace with plain tools.
        let mut seen: HashSet<&str> = HashSet::new();
        for tool in &self.tools {
            if !seen.insert(tool.name()) {
                bail!("Agent '{}' declares tool '{}' more than once", self.name, tool.name());
            }
        }
        for agent in &self.agent_tools {
            if !seen.insert(agent.name()) {
                bail!("Agent '{}' declares tool '{}' more than once", self.name, agent.name());
            }
        }

        Ok(AgentDescriptor {
            name: self.name,
            model: self.model,
            description: self.description,
            instruction: self.instruction,
            tools: self.tools,
            agent_tools: self.agent_tools,
            sub_agents: self.sub_agents,
        })
    }
}

const WEATHER_INSTRUCTION: &str = "\
You are a weather expert. Answer weather questions such as:
- What is the weather like in a city right now?
- Should I carry an umbrella tomorrow in Paris?
- What is the temperature forecast for the next 3 days in Tokyo?

Ask for the location when it is missing.
For forecasts, default to 3 days when the user gives no count.
Use `get_current_weather` for live conditions and `get_weather_forecast` for future days.";

const NATIONAL_PARKS_INSTRUCTION: &str = "\
You are a U.S. National Parks expert helping travelers plan park visits.
- List things to do in a park with `get_things_to_do`.
- Check alerts such as closures, fire warnings or weather cautions with `get_alerts`.

Convert park names to their 4-letter park code and states to their 2-letter state code.
If neither a park nor a state is known, ask the user for one.
If either is present, call the tools with it.
Keep answers short and useful for trip planning, and mention the park name when relevant.";

const FLIGHT_FINDER_INSTRUCTION: &str = "\
You help travelers find flights and ticket prices.
Use `web_search` with queries such as:
- \"flights from Hyderabad to Delhi on June 10\"
- \"cheap flights to San Francisco from New York in July\"

Resolve relative dates like \"next weekend\" to exact dates before searching.
Summarize the results and point the user to next steps for booking.";

const MANAGER_INSTRUCTION: &str = "\
You are a travel manager coordinating trip planning.
Delegate by the nature of the request:
- `weather` for current or forecast weather at a location.
- `national_parks` for park alerts and activities in U.S. national parks.

Use these tools when needed:
- `flight_finder` to look up flight options and prices.
- `get_current_time` whenever the user mentions a relative date that must become an
  actual date, such as \"next week\", \"in 3 days\" or \"this weekend\".

Answer from the most relevant agent or tool for the traveler's request.";

fn registered(registry: &ToolRegistry, name: &str) -> Result<Arc<dyn Tool>> {
    registry
        .get(name)
        .ok_or_else(|| anyhow!("Tool '{name}' is not registered"))
}

/// Build the manager agent and its specialists from registered tools.
pub fn travel_manager(model: &str, registry: &ToolRegistry) -> Result<AgentDescriptor> {
    let weather = AgentDescriptor::builder("weather")
        .model(model)
        .description("Provides current weather and multi-day forecasts for any location.")
        .instruction(WEATHER_INSTRUCTION)
        .tool(registered(registry, "get_current_weather")?)
        .tool(registered(registry, "get_weather_forecast")?)
        .build()?;

    let national_parks = AgentDescriptor::builder("national_parks")
        .model(model)
        .description("Provides things to do and safety alerts for U.S. national parks.")
        .instruction(NATIONAL_PARKS_INSTRUCTION)
        .tool(registered(registry, "get_things_to_do")?)
        .tool(registered(registry, "get_alerts")?)
        .build()?;

    let flight_finder = AgentDescriptor::builder("flight_finder")
        .model(model)
        .description("Finds flight options and prices using web search.")
        .instruction(FLIGHT_FINDER_INSTRUCTION)
        .tool(registered(registry, "web_search")?)
        .build()?;

    AgentDescriptor::builder("travel_manager")
        .model(model)
        .description("Travel coordinator that delegates to specialized travel assistants.")
        .instruction(MANAGER_INSTRUCTION)
        .sub_agent(Arc::new(weather))
        .sub_agent(Arc::new(national_parks))
        .tool(registered(registry, "get_current_time")?)
        .agent_tool(Arc::new(flight_finder))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, tool::NoSearchBackend};

    fn registry() -> ToolRegistry {
        ToolRegistry::standard(&Config::default(), Arc::new(NoSearchBackend))
    }

    #[test]
    fn manager_wires_specialists() {
        let manager = travel_manager("gemini-2.0-flash", &registry()).expect("build");

        assert_eq!(manager.name(), "travel_manager");
        assert_eq!(manager.tool_names(), vec!["get_current_time"]);

        let subs: Vec<_> = manager.sub_agents().iter().map(|a| a.name()).collect();
        assert_eq!(subs, vec!["weather", "national_parks"]);

        let agent_tools: Vec<_> = manager.agent_tools().iter().map(|a| a.name()).collect();
        assert_eq!(agent_tools, vec!["flight_finder"]);
    }

    #[test]
    fn specialists_get_their_tools() {
        let manager = travel_manager("m", &registry()).expect("build");

        let weather = manager.find("weather").expect("weather agent");
        assert_eq!(weather.tool_names(), vec!["get_current_weather", "get_weather_forecast"]);

        let parks = manager.find("national_parks").expect("parks agent");
        assert_eq!(parks.tool_names(), vec!["get_things_to_do", "get_alerts"]);

        let flights = manager.find("flight_finder").expect("flight agent");
        assert_eq!(flights.tool_names(), vec!["web_search"]);
        assert_eq!(flights.model(), "m");
    }

    #[test]
    fn missing_tool_fails_wiring() {
        let err = travel_manager("m", &ToolRegistry::new()).unwrap_err();
        assert!(err.to_string().contains("is not registered"));
    }

    #[test]
    fn builder_rejects_duplicate_tools() {
        let reg = registry();
        let time = reg.get("get_current_time").unwrap();

        let err = AgentDescriptor::builder("dup")
            .tool(time.clone())
            .tool(time)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn builder_rejects_empty_name() {
        assert!(AgentDescriptor::builder(" ").build().is_err());
    }

    #[test]
    fn manifest_nests_the_tree() {
        let manifest = travel_manager("m", &registry()).expect("build").manifest();

        assert_eq!(manifest["name"], "travel_manager");
        assert_eq!(manifest["tools"][0]["function"]["name"], "get_current_time");
        assert_eq!(manifest["agent_tools"][0]["name"], "flight_finder");
        assert_eq!(manifest["sub_agents"][1]["tools"][1]["function"]["name"], "get_alerts");
    }
}
