use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::{
    ToolResult,
    model::{CurrentWeather, WeatherForecast},
    provider::weatherapi::{DEFAULT_FORECAST_DAYS, WeatherApiProvider},
    tool::{Tool, parse_args},
};

#[derive(Debug, Deserialize)]
struct CurrentWeatherArgs {
    location: String,
}

#[derive(Debug, Deserialize)]
struct ForecastArgs {
    location: String,
    #[serde(default = "default_days")]
    days: i64,
}

fn default_days() -> i64 {
    DEFAULT_FORECAST_DAYS
}

#[derive(Debug, Clone)]
pub struct CurrentWeatherTool {
    provider: Arc<WeatherApiProvider>,
}

impl CurrentWeatherTool {
    pub fn new(provider: Arc<WeatherApiProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for CurrentWeatherTool {
    fn name(&self) -> &'static str {
        "get_current_weather"
    }

    fn description(&self) -> &'static str {
        "Fetch current weather for a city name or latitude,longitude pair."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or coordinates, e.g. \"New York\" or \"37.7749,-122.4194\""
                }
            },
            "required": ["location"]
        })
    }

    async fn call(&self, args: Value) -> Value {
        let result: ToolResult<CurrentWeather> = match parse_args::<CurrentWeatherArgs>(args) {
            Ok(args) => self.provider.get_current_weather(&args.location).await,
            Err(err) => Err(err).into(),
        };
        result.to_value()
    }
}

#[derive(Debug, Clone)]
pub struct WeatherForecastTool {
    provider: Arc<WeatherApiProvider>,
}

impl WeatherForecastTool {
    pub fn new(provider: Arc<WeatherApiProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for WeatherForecastTool {
    fn name(&self) -> &'static str {
        "get_weather_forecast"
    }

    fn description(&self) -> &'static str {
        "Fetch a daily weather forecast (1 to 10 days) for a location."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": { "type": "string", "description": "City or coordinates" },
                "days": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 10,
                    "default": DEFAULT_FORECAST_DAYS,
                    "description": "Number of days to forecast"
                }
            },
            "required": ["location"]
        })
    }

    async fn call(&self, args: Value) -> Value {
        let result: ToolResult<WeatherForecast> = match parse_args::<ForecastArgs>(args) {
            Ok(args) => self.provider.get_weather_forecast(&args.location, args.days).await,
            Err(err) => Err(err).into(),
        };
        result.to_value()
    }
}
