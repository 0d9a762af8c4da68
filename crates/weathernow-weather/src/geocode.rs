//! Geocoding: place-name search and reverse lookups.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{LocationCandidate, WeatherError};

pub const GEOCODING_API_BASE: &str = "https://geocoding-api.open-meteo.com/v1";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_RESULT_COUNT: u32 = 5;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<LocationCandidate>>,
}

/// Client for the geocoding endpoints.
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    base_url: String,
    language: String,
    count: u32,
}

impl GeocodingClient {
    pub fn new() -> Result<Self, WeatherError> {
        Self::with_base_url(
            GEOCODING_API_BASE,
            Duration::from_secs(REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            count: DEFAULT_RESULT_COUNT,
        })
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    /// Maximum number of search results to request.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Search for places matching `query`.
    ///
    /// A blank query returns no candidates without touching the network.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, WeatherError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        let count = self.count.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", self.language.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body = Self::handle_response(response).await?;
        let results = body.results.unwrap_or_default();
        tracing::info!("Geocoding search returned {} candidates", results.len());
        Ok(results)
    }

    /// Look up the place nearest to the given coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<LocationCandidate>, WeatherError> {
        let url = format!("{}/reverse", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("language", self.language.clone()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?;

        let body = Self::handle_response(response).await?;
        Ok(body.results.and_then(|results| results.into_iter().next()))
    }

    /// Resolve a device position to a place, never failing.
    ///
    /// Falls back to a "Your location" placeholder carrying the raw
    /// coordinates if the lookup errors, times out, or finds nothing.
    pub async fn place_for_position(&self, latitude: f64, longitude: f64) -> LocationCandidate {
        match self.reverse(latitude, longitude).await {
            Ok(Some(place)) => {
                tracing::info!("Reverse geocoded to: {}", place.name);
                place
            }
            Ok(None) => {
                tracing::debug!("No reverse geocoding results, using coordinates");
                LocationCandidate::current_position(latitude, longitude)
            }
            Err(e) => {
                tracing::debug!("Reverse geocode failed: {}, using coordinates", e);
                LocationCandidate::current_position(latitude, longitude)
            }
        }
    }

    async fn handle_response(response: reqwest::Response) -> Result<GeocodingResponse, WeatherError> {
        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Geocoding returned status {}", status);
            return Err(WeatherError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| WeatherError::Parse(e.to_string()))
    }
}
