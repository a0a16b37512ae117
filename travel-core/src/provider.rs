use std::fmt::Display;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ToolError;

pub mod nps;
pub mod weatherapi;

/// Upstream services that need credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    Weather,
    NationalParks,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::Weather => "weather",
            ServiceId::NationalParks => "national_parks",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::Weather, ServiceId::NationalParks]
    }

    /// Environment variable that carries this service's API key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceId::Weather => "WEATHER_API_KEY",
            ServiceId::NationalParks => "NATIONAL_PARK_SERVICES_API",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ServiceId::Weather => "http://api.weatherapi.com/v1",
            ServiceId::NationalParks => "https://developer.nps.gov/api/v1",
        }
    }

    /// Human-facing upstream name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ServiceId::Weather => "WeatherAPI",
            ServiceId::NationalParks => "NPS API",
        }
    }
}

impl Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase().replace('-', "_");

        match lower.as_str() {
            "weather" => Ok(ServiceId::Weather),
            "national_parks" | "nps" => Ok(ServiceId::NationalParks),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: weather, national_parks."
            )),
        }
    }
}

/// Issue one GET against `url` and decode the JSON body.
///
/// Non-2xx statuses become [`ToolError::Status`] carrying a truncated body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http: &Client,
    service: ServiceId,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ToolError> {
    debug!(%service, url, "sending upstream request");

    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|source| ToolError::Request { service: service.display_name(), source })?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|source| ToolError::Request { service: service.display_name(), source })?;

    if !status.is_success() {
        return Err(ToolError::Status {
            service: service.display_name(),
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|source| ToolError::Decode { service: service.display_name(), source })
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
