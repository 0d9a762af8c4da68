//! Typed access to the persisted unit and recent-search keys.
//!
//! Persistence is best-effort: failures are logged and the in-memory state
//! carries on with defaults.

use std::sync::Arc;

use weathernow_core::PreferenceStore;
use weathernow_weather::{RecentLocation, RecentSearches, TemperatureUnit};

pub const UNIT_KEY: &str = "wn_unit";
pub const RECENT_KEY: &str = "wn_recent";

/// Map the configured default unit onto the display unit.
pub fn unit_from_config(unit: weathernow_core::TemperatureUnit) -> TemperatureUnit {
    match unit {
        weathernow_core::TemperatureUnit::Celsius => TemperatureUnit::Celsius,
        weathernow_core::TemperatureUnit::Fahrenheit => TemperatureUnit::Fahrenheit,
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PreferenceStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Dropping unreadable preference {}: {}", key, e);
                    if let Err(e) = self.store.remove(key) {
                        tracing::warn!("Failed to remove preference {}: {}", key, e);
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read preference {}: {}", key, e);
                None
            }
        }
    }

    fn write<T: serde::Serialize>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to serialize preference {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(key, value) {
            tracing::warn!("Failed to save preference {}: {}", key, e);
        }
    }

    /// Stored unit, or `default` when nothing usable is stored.
    pub fn unit(&self, default: TemperatureUnit) -> TemperatureUnit {
        self.read(UNIT_KEY).unwrap_or(default)
    }

    pub fn save_unit(&self, unit: TemperatureUnit) {
        self.write(UNIT_KEY, &unit);
    }

    pub fn recent(&self) -> RecentSearches {
        self.read::<Vec<RecentLocation>>(RECENT_KEY)
            .map(RecentSearches::from_entries)
            .unwrap_or_default()
    }

    pub fn save_recent(&self, recent: &RecentSearches) {
        self.write(RECENT_KEY, recent);
    }
}
