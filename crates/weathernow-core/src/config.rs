use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

const APP_DIR: &str = "weathernow";
const CONFIG_FILE: &str = "config.toml";
const PREFERENCES_FILE: &str = "preferences.json";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Open-Meteo endpoints and request settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Device location settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Weather display settings
    #[serde(default)]
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the geocoding API (search and reverse lookups)
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Base URL of the forecast API
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,

    /// Language for place names
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of candidates returned by a search
    #[serde(default = "default_search_count")]
    pub search_count: u32,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

fn default_geocoding_url() -> String {
    "https://geocoding-api.open-meteo.com/v1".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_search_count() -> u32 {
    5
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            geocoding_url: default_geocoding_url(),
            forecast_url: default_forecast_url(),
            language: default_language(),
            search_count: default_search_count(),
            timeout_secs: default_request_timeout(),
        }
    }
}

/// Device location configuration.
///
/// A terminal has no position sensor, so "use my location" reads the
/// coordinates configured here. Leave them unset to report geolocation as
/// unsupported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// How long to wait for a position fix, in seconds
    #[serde(default = "default_location_timeout")]
    pub timeout_secs: u64,

    /// Request the most accurate fix the source can provide
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
}

fn default_location_timeout() -> u64 {
    10
}

fn default_high_accuracy() -> bool {
    true
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_secs: default_location_timeout(),
            high_accuracy: default_high_accuracy(),
        }
    }
}

impl LocationConfig {
    /// Configured coordinates, if both are set.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Temperature unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherConfig {
    /// Unit used until the user toggles it (the toggle is remembered in preferences)
    #[serde(default)]
    pub default_unit: TemperatureUnit,
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            config_dir,
            api: ApiConfig::default(),
            location: LocationConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_url(&self.api.geocoding_url, "api.geocoding_url", &mut result);
        Self::validate_url(&self.api.forecast_url, "api.forecast_url", &mut result);

        if self.api.language.trim().is_empty() {
            result.add_error("api.language", "Language must not be empty");
        }

        if self.api.search_count == 0 {
            result.add_error("api.search_count", "Search count must be greater than 0");
        } else if self.api.search_count > 100 {
            result.add_warning(
                "api.search_count",
                "Search count above 100 is capped by the geocoding API",
            );
        }

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Request timeout must be greater than 0");
        }

        if self.location.timeout_secs == 0 {
            result.add_error(
                "location.timeout_secs",
                "Location timeout must be greater than 0",
            );
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    result.add_error("location.latitude", "Latitude must be within -90..=90");
                }
                if !(-180.0..=180.0).contains(&lon) {
                    result.add_error(
                        "location.longitude",
                        "Longitude must be within -180..=180",
                    );
                }
            }
            (None, None) => {
                result.add_warning(
                    "location",
                    "No coordinates configured - \"use my location\" will be unavailable",
                );
            }
            _ => {
                result.add_error(
                    "location",
                    "Latitude and longitude must be set together",
                );
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the preference store (unit and recent searches)
    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(config_dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_default_endpoints() {
        let config = Config::default();
        assert_eq!(config.api.geocoding_url, "https://geocoding-api.open-meteo.com/v1");
        assert_eq!(config.api.forecast_url, "https://api.open-meteo.com/v1");
        assert_eq!(config.api.search_count, 5);
        assert_eq!(config.location.timeout_secs, 10);
        assert!(config.location.high_accuracy);
        assert_eq!(config.weather.default_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.api.forecast_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.forecast_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.api.geocoding_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_search_count() {
        let mut config = Config::default();
        config.api.search_count = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "api.search_count"));
    }

    #[test]
    fn test_missing_coordinates_is_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_half_configured_coordinates_is_error() {
        let mut config = Config::default();
        config.location.latitude = Some(48.85);
        let result = config.validate();
        assert!(!result.is_valid());
        assert_eq!(config.location.coordinates(), None);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let mut config = Config::default();
        config.location.latitude = Some(91.0);
        config.location.longitude = Some(2.35);
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_load_creates_default_then_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.config_dir, dir.path());

        let mut edited = created.clone();
        edited.location.latitude = Some(48.8566);
        edited.location.longitude = Some(2.3522);
        edited.weather.default_unit = TemperatureUnit::Fahrenheit;
        edited.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.location.coordinates(), Some((48.8566, 2.3522)));
        assert_eq!(loaded.weather.default_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(loaded.preferences_path(), dir.path().join("preferences.json"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nsearch_count = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_partial_file_uses_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!("config_dir = {:?}\n\n[api]\nsearch_count = 3\n", dir.path()),
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.search_count, 3);
        assert_eq!(config.api.language, "en");
        assert_eq!(config.location.timeout_secs, 10);
    }
}
