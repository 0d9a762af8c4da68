use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{CurrentConditions, LocationCandidate, WeatherError, WeatherReport};

pub const FORECAST_API_BASE: &str = "https://api.open-meteo.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Variables requested for the current-conditions block.
pub const CURRENT_FIELDS: [&str; 7] = [
    "temperature_2m",
    "apparent_temperature",
    "relative_humidity_2m",
    "wind_speed_10m",
    "wind_direction_10m",
    "weather_code",
    "is_day",
];

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: Option<CurrentConditions>,
}

/// Current-conditions client for the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(FORECAST_API_BASE, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch current conditions for a place, in Celsius and km/h.
    #[instrument(skip(self, place), fields(place = %place.name), level = "info")]
    pub async fn fetch_current(&self, place: &LocationCandidate) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", place.latitude.to_string()),
                ("longitude", place.longitude.to_string()),
                ("current", CURRENT_FIELDS.join(",")),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Forecast returned status {}", status);
            return Err(WeatherError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let body: ForecastResponse =
            serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))?;
        let current = body.current.ok_or(WeatherError::MissingCurrent)?;

        tracing::info!("Weather data fetched for {}", place.name);
        Ok(WeatherReport {
            place: place.clone(),
            current,
            fetched_at: Utc::now(),
        })
    }
}
