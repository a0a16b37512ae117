use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Current conditions, flattened from the upstream response.
///
/// Fields the upstream omits stay `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub location: Option<String>,
    pub country: Option<String>,
    pub temperature_c: Option<f64>,
    pub condition: Option<String>,
    pub humidity: Option<Number>,
    pub wind_kph: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    pub location: Option<String>,
    pub country: Option<String>,
    /// One entry per day, in upstream (chronological) order.
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    pub condition: String,
    pub max_wind_kph: f64,
    pub chance_of_rain: Option<Number>,
}

/// Filters for the national parks endpoints.
///
/// Nothing here is mandatory; with no filters the upstream answers unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParkQuery {
    #[serde(default)]
    pub park_code: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    /// Free-text search term (things-to-do only).
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Sort key such as `-relevanceScore` (things-to-do only).
    #[serde(default)]
    pub sort: Option<String>,
}

impl Default for ParkQuery {
    fn default() -> Self {
        Self { park_code: None, state_code: None, q: None, limit: default_limit(), sort: None }
    }
}

impl ParkQuery {
    pub fn park(code: impl Into<String>) -> Self {
        Self { park_code: Some(code.into()), ..Self::default() }
    }

    pub fn state(code: impl Into<String>) -> Self {
        Self { state_code: Some(code.into()), ..Self::default() }
    }
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThingsToDo {
    pub things_to_do: Vec<Value>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkAlerts {
    pub alerts: Vec<Value>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentTime {
    /// Local time as `YYYY-MM-DD HH:MM:SS`.
    pub current_time: String,
    pub weekday: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub results: Value,
}
