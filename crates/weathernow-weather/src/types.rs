use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Label used when a position cannot be resolved to a place name.
pub const CURRENT_POSITION_NAME: &str = "Your location";

/// Temperature unit preference. Persisted as `"C"` / `"F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// The other unit.
    pub fn toggled(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    /// Display suffix, e.g. `°C`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }

    /// Convert a Celsius reading into this unit.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A place returned by geocoding, or a raw position wrapped as a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub admin1: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// Placeholder for a device position that could not be reverse geocoded.
    pub fn current_position(latitude: f64, longitude: f64) -> Self {
        Self {
            id: None,
            name: CURRENT_POSITION_NAME.to_string(),
            country: String::new(),
            admin1: String::new(),
            latitude,
            longitude,
        }
    }
}

/// Trimmed projection of a location kept in the recent-search list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentLocation {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub admin1: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl RecentLocation {
    /// True if both entries name the same place (name, region, country).
    pub fn same_place(&self, other: &RecentLocation) -> bool {
        self.name == other.name && self.admin1 == other.admin1 && self.country == other.country
    }
}

impl From<&LocationCandidate> for RecentLocation {
    fn from(loc: &LocationCandidate) -> Self {
        Self {
            name: loc.name.clone(),
            country: loc.country.clone(),
            admin1: loc.admin1.clone(),
            latitude: loc.latitude,
            longitude: loc.longitude,
        }
    }
}

impl From<&RecentLocation> for LocationCandidate {
    fn from(recent: &RecentLocation) -> Self {
        Self {
            id: None,
            name: recent.name.clone(),
            country: recent.country.clone(),
            admin1: recent.admin1.clone(),
            latitude: recent.latitude,
            longitude: recent.longitude,
        }
    }
}

/// Current conditions for a single instant, as returned by the forecast API.
///
/// Every field is optional: the payload is not schema-validated and missing
/// values render as placeholders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Provider-local observation time, e.g. `2025-06-01T14:15`
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "temperature_2m", default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub apparent_temperature: Option<f64>,
    #[serde(rename = "relative_humidity_2m", default)]
    pub humidity: Option<f64>,
    /// km/h
    #[serde(rename = "wind_speed_10m", default)]
    pub wind_speed: Option<f64>,
    /// Degrees, meteorological convention (0 = from north)
    #[serde(rename = "wind_direction_10m", default)]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub weather_code: Option<i32>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

impl CurrentConditions {
    pub fn is_day(&self) -> Option<bool> {
        self.is_day.map(|flag| flag != 0)
    }

    /// Observation time parsed from the provider's local ISO timestamp.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let time = self.time.as_deref()?;
        NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

/// A successful weather lookup for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub place: LocationCandidate,
    pub current: CurrentConditions,
    pub fetched_at: DateTime<Utc>,
}

/// Device location errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location service not supported")]
    Unsupported,
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Open-Meteo request errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Forecast response has no current conditions")]
    MissingCurrent,
}
