//! Centralized error types for Weather Now.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides short, static messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// Service errors from the UI layer are mapped into this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Geolocation(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Weather lookup errors: location search and current-conditions fetch.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No locations matched query: {0}")]
    NoResults(String),

    #[error("Location search failed: {0}")]
    SearchFailed(String),

    #[error("Weather fetch failed: {0}")]
    FetchFailed(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::NoResults(_) => "No matching locations found.",
            WeatherError::SearchFailed(_) => "Failed to search locations. Please try again.",
            WeatherError::FetchFailed(_) => "Couldn't load weather. Please try again.",
        }
    }
}

/// Device geolocation errors.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Geolocation unavailable: {0}")]
    Unavailable(String),
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation not supported on this system.",
            GeolocationError::Unavailable(_) => "Unable to access your location.",
        }
    }
}

/// Preference storage errors. Storage is best-effort, so these are logged
/// rather than shown in normal operation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read preferences: {0}")]
    Read(String),

    #[error("Failed to write preferences: {0}")]
    Write(String),

    #[error("Preferences are corrupted: {0}")]
    Corrupt(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Read(_) | StorageError::Corrupt(_) => {
                "Saved preferences could not be loaded. Using defaults."
            }
            StorageError::Write(_) => "Preferences could not be saved.",
        }
    }
}
