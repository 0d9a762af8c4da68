pub mod app;
pub mod config;
pub mod error;
pub mod store;

pub use app::App;
pub use config::{ApiConfig, Config, LocationConfig, TemperatureUnit, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, GeolocationError, StorageError, WeatherError};
pub use store::{FileStore, MemoryStore, PreferenceStore};

use anyhow::Result;

/// Initialize logging for the application
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!("Weather Now core initialized");
    Ok(())
}
