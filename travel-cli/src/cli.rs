use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::sync::Arc;
use travel_core::{
    Config, NpsProvider, ParkQuery, ServiceId, ToolRegistry, WeatherApiProvider,
    provider::weatherapi::DEFAULT_FORECAST_DAYS, tool::NoSearchBackend, travel_manager,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "travel", version, about = "Travel assistant tools")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key for a service.
    Configure {
        /// Service name: "weather" or "national_parks".
        service: String,
    },

    /// Weather lookups.
    #[command(subcommand)]
    Weather(WeatherCommand),

    /// National parks lookups.
    #[command(subcommand)]
    Parks(ParksCommand),

    /// Print the current local date and time.
    Time,

    /// Invoke a registered tool by name with JSON arguments.
    Call {
        tool: String,

        /// JSON object of arguments, e.g. '{"location":"Paris"}'.
        #[arg(default_value = "{}")]
        args: String,
    },

    /// Print the agent tree handed to the orchestrator.
    Agents,
}

#[derive(Debug, Subcommand)]
pub enum WeatherCommand {
    /// Current conditions.
    Current {
        /// City name or "lat,lon".
        location: String,
    },

    /// Daily forecast.
    Forecast {
        location: String,

        /// Number of days, 1 to 10.
        #[arg(long, default_value_t = DEFAULT_FORECAST_DAYS, allow_negative_numbers = true)]
        days: i64,
    },
}

#[derive(Debug, Args)]
pub struct ParkFilters {
    /// 4-letter park code, e.g. "yose".
    #[arg(long)]
    park_code: Option<String>,

    /// 2-letter state code, e.g. "CA".
    #[arg(long)]
    state_code: Option<String>,

    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Debug, Subcommand)]
pub enum ParksCommand {
    /// Suggested activities.
    ThingsToDo {
        #[command(flatten)]
        filters: ParkFilters,

        /// Free-text search term.
        #[arg(long)]
        q: Option<String>,

        /// Sort key, e.g. "-relevanceScore".
        #[arg(long)]
        sort: Option<String>,
    },

    /// Closures, cautions and other alerts.
    Alerts {
        #[command(flatten)]
        filters: ParkFilters,
    },
}

impl ParkFilters {
    fn into_query(self) -> ParkQuery {
        ParkQuery {
            park_code: self.park_code,
            state_code: self.state_code,
            limit: self.limit,
            ..ParkQuery::default()
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { service } => configure(&service)?,
            Command::Weather(cmd) => {
                let config = Config::from_environment()?;
                let weather = WeatherApiProvider::from_config(&config);
                let value = match cmd {
                    WeatherCommand::Current { location } => {
                        weather.get_current_weather(&location).await.to_value()
                    }
                    WeatherCommand::Forecast { location, days } => {
                        weather.get_weather_forecast(&location, days).await.to_value()
                    }
                };
                print_json(&value)?;
            }
            Command::Parks(cmd) => {
                let config = Config::from_environment()?;
                let nps = NpsProvider::from_config(&config);
                let value = match cmd {
                    ParksCommand::ThingsToDo { filters, q, sort } => {
                        let query = ParkQuery { q, sort, ..filters.into_query() };
                        nps.get_things_to_do(&query).await.to_value()
                    }
                    ParksCommand::Alerts { filters } => {
                        nps.get_alerts(&filters.into_query()).await.to_value()
                    }
                };
                print_json(&value)?;
            }
            Command::Time => print_json(&travel_core::tool::get_current_time().to_value())?,
            Command::Call { tool, args } => {
                let args: Value = serde_json::from_str(&args)
                    .with_context(|| format!("Arguments for '{tool}' are not valid JSON"))?;
                let registry = registry()?;
                if registry.get(&tool).is_none() {
                    bail!(
                        "Unknown tool '{tool}'. Available tools: {}",
                        registry.names().join(", ")
                    );
                }
                print_json(&registry.call(&tool, args).await)?;
            }
            Command::Agents => {
                let config = Config::from_environment()?;
                let registry = ToolRegistry::standard(&config, Arc::new(NoSearchBackend));
                let manager = travel_manager(&config.agents.model, &registry)?;
                print_json(&manager.manifest())?;
            }
        }

        Ok(())
    }
}

fn registry() -> Result<ToolRegistry> {
    let config = Config::from_environment()?;
    Ok(ToolRegistry::standard(&config, Arc::new(NoSearchBackend)))
}

fn configure(service: &str) -> Result<()> {
    let id = ServiceId::try_from(service)?;
    let mut config = Config::load()?;

    let api_key = inquire::Password::new(&format!("API key for {id}:"))
        .without_confirmation()
        .with_help_message(&format!("Can also be supplied through ${}", id.env_var()))
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }

    config.upsert_api_key(id, api_key.trim().to_string());
    let path = config.save()?;

    tracing::info!(service = %id, "stored API key");
    println!("Saved {id} API key to {}", path.display());
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
