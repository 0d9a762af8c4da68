//! Device position sources.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::LocationError;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Options for a position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// A device position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

/// Something that can report where the device is.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Whether this system offers a position at all.
    fn is_available(&self) -> bool;

    async fn current_position(&self, request: &LocationRequest) -> Result<Position, LocationError>;
}

/// Ask `source` for a position, bounded by the request timeout.
pub async fn get_current_location(
    source: &dyn LocationSource,
    request: &LocationRequest,
) -> Result<Position, LocationError> {
    if !source.is_available() {
        return Err(LocationError::Unsupported);
    }

    tracing::debug!(
        "Requesting position (high accuracy: {}, timeout {:?})",
        request.high_accuracy,
        request.timeout
    );

    match tokio::time::timeout(request.timeout, source.current_position(request)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!("Position request timed out after {:?}", request.timeout);
            Err(LocationError::Timeout)
        }
    }
}

/// Position taken from configuration, reported as exact.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationSource {
    position: Position,
}

impl FixedLocationSource {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            position: Position {
                latitude,
                longitude,
                accuracy_meters: Some(0.0),
            },
        }
    }
}

#[async_trait]
impl LocationSource for FixedLocationSource {
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self, _request: &LocationRequest) -> Result<Position, LocationError> {
        Ok(self.position)
    }
}

/// Used when the system has no way to report a position.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationSource;

#[async_trait]
impl LocationSource for UnavailableLocationSource {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self, _request: &LocationRequest) -> Result<Position, LocationError> {
        Err(LocationError::Unsupported)
    }
}
