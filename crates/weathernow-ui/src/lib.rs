//! Front-end state for Weather Now.
//!
//! `WeatherModel` holds the screen state on the UI thread; `services` runs the
//! network work on a tokio runtime and reports back over a channel.

mod error_mapping;
pub mod models;
pub mod preferences;
pub mod render;
pub mod services;

pub use models::weather_model::WeatherModel;
pub use preferences::{unit_from_config, Preferences};
pub use render::render;
pub use services::{WeatherServiceMessage, WeatherServices};
