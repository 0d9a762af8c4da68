//! Weather backend: async search, fetch and geolocation.
//! All network work runs off the UI thread; results sent via mpsc.
//!
//! Every request carries the generation it was issued under and a
//! cancellation token. Starting a newer request cancels the older one, and
//! the model drops any completion whose generation is no longer current.

use std::future::Future;
use std::sync::mpsc::Sender;

use tokio_util::sync::CancellationToken;
use weathernow_weather::{
    get_current_location, LocationCandidate, LocationError, WeatherError as ApiError,
    WeatherReport,
};

use super::WeatherServices;

/// Error type for weather operations
#[derive(Debug)]
pub enum WeatherError {
    /// Search succeeded but matched nothing
    NoResults(String),
    Search(ApiError),
    Fetch(ApiError),
    Location(LocationError),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::NoResults(q) => write!(f, "No locations match \"{}\"", q),
            WeatherError::Search(e) => write!(f, "Search error: {}", e),
            WeatherError::Fetch(e) => write!(f, "Weather error: {}", e),
            WeatherError::Location(e) => write!(f, "Location error: {}", e),
        }
    }
}

impl std::error::Error for WeatherError {}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of a place search
    SearchDone {
        generation: u64,
        result: Result<Vec<LocationCandidate>, WeatherError>,
    },
    /// Result of fetching current conditions
    FetchDone {
        generation: u64,
        result: Result<WeatherReport, WeatherError>,
    },
    /// Device position resolved to a place (or a "Your location" placeholder)
    PositionResolved {
        generation: u64,
        result: Result<LocationCandidate, WeatherError>,
    },
}

impl WeatherServiceMessage {
    pub fn generation(&self) -> u64 {
        match self {
            Self::SearchDone { generation, .. }
            | Self::FetchDone { generation, .. }
            | Self::PositionResolved { generation, .. } => *generation,
        }
    }
}

/// Run `work` on the service runtime unless `cancel` fires first.
fn spawn_cancellable<F>(
    services: &WeatherServices,
    cancel: CancellationToken,
    tx: &Sender<WeatherServiceMessage>,
    work: F,
) where
    F: Future<Output = WeatherServiceMessage> + Send + 'static,
{
    let tx = tx.clone();
    services.runtime().spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Weather request superseded, dropping");
            }
            message = work => {
                let _ = tx.send(message);
            }
        }
    });
}

/// Request a place search asynchronously.
/// Sends `SearchDone` on the channel when complete.
pub fn request_search(
    tx: &Sender<WeatherServiceMessage>,
    services: &WeatherServices,
    generation: u64,
    cancel: CancellationToken,
    query: String,
) {
    let geocoder = services.geocoder();

    spawn_cancellable(services, cancel, tx, async move {
        let result = match geocoder.search(&query).await {
            Ok(results) if results.is_empty() => Err(WeatherError::NoResults(query)),
            Ok(results) => Ok(results),
            Err(e) => {
                tracing::warn!("Location search failed: {}", e);
                Err(WeatherError::Search(e))
            }
        };
        WeatherServiceMessage::SearchDone { generation, result }
    });
}

/// Request current conditions for a place asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    services: &WeatherServices,
    generation: u64,
    cancel: CancellationToken,
    place: LocationCandidate,
) {
    let provider = services.provider();

    spawn_cancellable(services, cancel, tx, async move {
        let result = provider.fetch_current(&place).await.map_err(|e| {
            tracing::warn!("Failed to fetch weather for {}: {}", place.name, e);
            WeatherError::Fetch(e)
        });
        WeatherServiceMessage::FetchDone { generation, result }
    });
}

/// Request the device position and resolve it to a place asynchronously.
/// Sends `PositionResolved` on the channel when complete.
pub fn request_locate(
    tx: &Sender<WeatherServiceMessage>,
    services: &WeatherServices,
    generation: u64,
    cancel: CancellationToken,
) {
    let locator = services.locator();
    let request = services.location_request();
    let geocoder = services.geocoder();

    spawn_cancellable(services, cancel, tx, async move {
        let result = match get_current_location(locator.as_ref(), &request).await {
            Ok(pos) => {
                tracing::info!(
                    "Got location: {}, {} (accuracy {:?} m)",
                    pos.latitude,
                    pos.longitude,
                    pos.accuracy_meters
                );
                Ok(geocoder.place_for_position(pos.latitude, pos.longitude).await)
            }
            Err(e) => {
                tracing::warn!("Failed to get device location: {}", e);
                Err(WeatherError::Location(e))
            }
        };
        WeatherServiceMessage::PositionResolved { generation, result }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_display() {
        assert!(format!("{}", WeatherError::NoResults("Xyz".into())).contains("Xyz"));
        assert!(format!("{}", WeatherError::Fetch(ApiError::Status(503))).contains("503"));
        assert!(format!("{}", WeatherError::Location(LocationError::Timeout)).contains("Location"));
    }

    #[test]
    fn weather_service_message_generation() {
        let msg = WeatherServiceMessage::SearchDone {
            generation: 7,
            result: Err(WeatherError::NoResults("x".into())),
        };
        assert_eq!(msg.generation(), 7);

        let msg = WeatherServiceMessage::PositionResolved {
            generation: 9,
            result: Ok(LocationCandidate::current_position(0.0, 0.0)),
        };
        assert_eq!(msg.generation(), 9);
    }
}
