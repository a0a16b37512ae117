//! Core library for the travel assistant.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Adapters over the weather and national parks REST APIs
//! - The uniform tool result envelope and the tool registry
//! - Agent descriptors consumed by an external orchestration runtime
//!
//! It is used by `travel-cli`, but can also be embedded by an orchestrator.

pub mod agent;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod provider;
pub mod tool;

pub use agent::{AgentBuilder, AgentDescriptor, travel_manager};
pub use config::{AgentsConfig, Config, ServiceConfig};
pub use envelope::ToolResult;
pub use error::ToolError;
pub use model::{
    CurrentTime, CurrentWeather, ForecastDay, ParkAlerts, ParkQuery, SearchResults, ThingsToDo,
    WeatherForecast,
};
pub use provider::{ServiceId, nps::NpsProvider, weatherapi::WeatherApiProvider};
pub use tool::{SearchBackend, Tool, ToolRegistry};
