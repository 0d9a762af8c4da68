pub mod weather_service;

use std::sync::Arc;
use std::time::Duration;

use weathernow_core::Config;
use weathernow_weather::{
    FixedLocationSource, GeocodingClient, LocationRequest, LocationSource,
    UnavailableLocationSource, WeatherError as ApiError, WeatherProvider,
};

pub use weather_service::{
    request_fetch as request_weather_fetch, request_locate as request_weather_locate,
    request_search as request_weather_search, WeatherError, WeatherServiceMessage,
};

/// Shared clients and the runtime the weather requests run on.
#[derive(Clone)]
pub struct WeatherServices {
    runtime: tokio::runtime::Handle,
    geocoder: Arc<GeocodingClient>,
    provider: Arc<WeatherProvider>,
    locator: Arc<dyn LocationSource>,
    location_request: LocationRequest,
}

impl WeatherServices {
    pub fn new(
        runtime: tokio::runtime::Handle,
        geocoder: GeocodingClient,
        provider: WeatherProvider,
        locator: Arc<dyn LocationSource>,
        location_request: LocationRequest,
    ) -> Self {
        Self {
            runtime,
            geocoder: Arc::new(geocoder),
            provider: Arc::new(provider),
            locator,
            location_request,
        }
    }

    /// Build clients from configuration.
    ///
    /// Configured coordinates become the device position; without them
    /// geolocation reports as unsupported.
    pub fn from_config(config: &Config, runtime: tokio::runtime::Handle) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.api.timeout_secs);

        let geocoder = GeocodingClient::with_base_url(&config.api.geocoding_url, timeout)?
            .with_language(&config.api.language)
            .with_count(config.api.search_count);
        let provider = WeatherProvider::with_base_url(&config.api.forecast_url, timeout)?;

        let locator: Arc<dyn LocationSource> = match config.location.coordinates() {
            Some((lat, lon)) => {
                tracing::info!("Using configured device position {}, {}", lat, lon);
                Arc::new(FixedLocationSource::new(lat, lon))
            }
            None => Arc::new(UnavailableLocationSource),
        };

        let location_request = LocationRequest {
            high_accuracy: config.location.high_accuracy,
            timeout: Duration::from_secs(config.location.timeout_secs),
        };

        Ok(Self::new(runtime, geocoder, provider, locator, location_request))
    }

    pub fn runtime(&self) -> &tokio::runtime::Handle {
        &self.runtime
    }

    pub fn geocoder(&self) -> Arc<GeocodingClient> {
        self.geocoder.clone()
    }

    pub fn provider(&self) -> Arc<WeatherProvider> {
        self.provider.clone()
    }

    pub fn locator(&self) -> Arc<dyn LocationSource> {
        self.locator.clone()
    }

    pub fn location_request(&self) -> LocationRequest {
        self.location_request
    }

    /// Whether "use my location" can work on this system.
    pub fn geolocation_available(&self) -> bool {
        self.locator.is_available()
    }
}
