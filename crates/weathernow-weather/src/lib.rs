//! Weather service for Weather Now
//!
//! Place search, reverse geocoding and current conditions via the Open-Meteo
//! APIs, device position sources, and the display helpers used to present
//! the results.

pub mod format;
pub mod geocode;
pub mod location;
pub mod provider;
pub mod recent;
pub mod types;
pub mod wmo;

pub use geocode::GeocodingClient;
pub use location::{
    get_current_location, FixedLocationSource, LocationRequest, LocationSource, Position,
    UnavailableLocationSource,
};
pub use provider::WeatherProvider;
pub use recent::{RecentSearches, MAX_RECENT};
pub use types::*;
pub use wmo::WeatherCode;
