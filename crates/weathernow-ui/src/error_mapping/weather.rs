use crate::services::weather_service::WeatherError as UiWeatherError;
use weathernow_core::{AppError, GeolocationError, WeatherError};
use weathernow_weather::LocationError;

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::NoResults(q) => AppError::Weather(WeatherError::NoResults(q)),
            UiWeatherError::Search(e) => AppError::Weather(WeatherError::SearchFailed(e.to_string())),
            UiWeatherError::Fetch(e) => AppError::Weather(WeatherError::FetchFailed(e.to_string())),
            UiWeatherError::Location(LocationError::Unsupported) => {
                AppError::Geolocation(GeolocationError::Unsupported)
            }
            UiWeatherError::Location(e) => {
                AppError::Geolocation(GeolocationError::Unavailable(e.to_string()))
            }
        }
    }
}
