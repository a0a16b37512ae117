use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Number, Value};

use crate::{
    ToolResult,
    config::Config,
    error::ToolError,
    model::{CurrentWeather, ForecastDay, WeatherForecast},
    provider::{ServiceId, get_json},
};

pub const MIN_FORECAST_DAYS: i64 = 1;
pub const MAX_FORECAST_DAYS: i64 = 10;
pub const DEFAULT_FORECAST_DAYS: i64 = 3;

const MISSING_KEY: &str = "Missing API key";

/// Adapter over the weatherapi.com current and forecast endpoints.
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api_key(ServiceId::Weather).map(str::to_owned),
            config.base_url(ServiceId::Weather),
        )
    }

    /// Current conditions for a city name or `lat,lon` pair.
    pub async fn get_current_weather(&self, location: &str) -> ToolResult<CurrentWeather> {
        let result = self.fetch_current(location).await;
        if let Err(err) = &result {
            err.log("get_current_weather", location);
        }
        result.into()
    }

    /// Daily forecast for `days` days, 1 through 10 inclusive.
    pub async fn get_weather_forecast(
        &self,
        location: &str,
        days: i64,
    ) -> ToolResult<WeatherForecast> {
        let result = self.fetch_forecast(location, days).await;
        if let Err(err) = &result {
            err.log("get_weather_forecast", location);
        }
        result.into()
    }

    fn api_key(&self) -> Result<&str, ToolError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ToolError::MissingApiKey(MISSING_KEY))
    }

    async fn fetch_current(&self, location: &str) -> Result<CurrentWeather, ToolError> {
        let key = self.api_key()?;
        require_location(location)?;

        let url = format!("{}/current.json", self.base_url);
        let parsed: WaCurrentResponse = get_json(
            &self.http,
            ServiceId::Weather,
            &url,
            &[("key", key.to_owned()), ("q", location.to_owned())],
        )
        .await?;

        let location = parsed.location.unwrap_or_default();
        let current = parsed.current.unwrap_or_default();

        Ok(CurrentWeather {
            location: location.name,
            country: location.country,
            temperature_c: current.temp_c,
            condition: current.condition.and_then(|c| c.text),
            humidity: current.humidity,
            wind_kph: current.wind_kph,
        })
    }

    async fn fetch_forecast(
        &self,
        location: &str,
        days: i64,
    ) -> Result<WeatherForecast, ToolError> {
        let key = self.api_key()?;

        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(ToolError::ForecastDays);
        }

        require_location(location)?;

        let url = format!("{}/forecast.json", self.base_url);
        let parsed: WaForecastResponse = get_json(
            &self.http,
            ServiceId::Weather,
            &url,
            &[("key", key.to_owned()), ("q", location.to_owned()), ("days", days.to_string())],
        )
        .await?;

        let location = parsed.location.unwrap_or_default();
        let forecast = parsed
            .forecast
            .map(|f| f.forecastday)
            .unwrap_or_default()
            .into_iter()
            .map(|entry| ForecastDay {
                date: entry.date,
                avg_temp_c: entry.day.avgtemp_c,
                condition: entry.day.condition.text,
                max_wind_kph: entry.day.maxwind_kph,
                chance_of_rain: entry.day.daily_chance_of_rain,
            })
            .collect();

        Ok(WeatherForecast { location: location.name, country: location.country, forecast })
    }
}

/// Rejects blank locations. The location itself is sent upstream verbatim.
fn require_location(location: &str) -> Result<(), ToolError> {
    if location.trim().is_empty() {
        return Err(ToolError::invalid_input("Location must not be empty"));
    }
    Ok(())
}

/// Keep a numeric field only if it decodes as `T`; anything else becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// Current-conditions fields are all optional: gaps surface as nulls.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaLocation {
    name: Option<String>,
    country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaCurrentCondition {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WaCurrent {
    #[serde(deserialize_with = "lenient")]
    temp_c: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    humidity: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    wind_kph: Option<f64>,
    condition: Option<WaCurrentCondition>,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    #[serde(default)]
    location: Option<WaLocation>,
    #[serde(default)]
    current: Option<WaCurrent>,
}

// Forecast days are strict: a day without its core fields is a decode error.

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    maxwind_kph: f64,
    condition: WaCondition,
    #[serde(default, deserialize_with = "lenient")]
    daily_chance_of_rain: Option<Number>,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    #[serde(default)]
    location: Option<WaLocation>,
    #[serde(default)]
    forecast: Option<WaForecast>,
}
