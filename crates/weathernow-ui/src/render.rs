//! Plain-text rendering of the weather screen.

use std::fmt::Write;

use chrono::Local;
use weathernow_weather::wmo::FALLBACK_PICTOGRAM;
use weathernow_weather::{format, WeatherCode};

use crate::models::weather_model::WeatherModel;

pub const TITLE: &str = "Weather Now";
pub const SELECT_PROMPT: &str = "Select a location:";
pub const RECENT_HEADING: &str = "Recent searches";
pub const NO_RECENT: &str = "No recent cities yet.";
pub const EMPTY_HINT: &str = "Search a city to see current weather.";

/// Caption of the search action, `Searching…` while a request is pending.
pub fn search_caption(model: &WeatherModel) -> &'static str {
    if model.loading() {
        "Searching…"
    } else {
        "Search"
    }
}

/// Render the whole screen as text.
pub fn render(model: &WeatherModel) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(
        out,
        "{}   [{}]{}",
        TITLE,
        format::unit_toggle_caption(model.unit()),
        if model.geolocation_available() { "   [Use my location]" } else { "" }
    );
    let _ = writeln!(out, "Search: {}   [{}]", model.query(), search_caption(model));

    if !model.error_message().is_empty() {
        let _ = writeln!(out, "! {}", model.error_message());
    }

    if !model.candidates().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", SELECT_PROMPT);
        for (i, place) in model.candidates().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, format::candidate_label(place));
        }
    }

    match (model.place(), model.current()) {
        (Some(place), Some(current)) => {
            let unit = model.unit();
            let code = current.weather_code.map(WeatherCode);

            let _ = writeln!(out);
            let _ = writeln!(out, "== {} ==", format::place_heading(place));
            let _ = writeln!(out, "{}", format::coordinates(place.latitude, place.longitude));
            let _ = writeln!(
                out,
                "{}",
                code.map(WeatherCode::pictogram).unwrap_or(FALLBACK_PICTOGRAM)
            );
            let _ = writeln!(out, "Temperature: {}", format::temperature(current.temperature, unit));
            let _ = writeln!(
                out,
                "Feels: {}",
                format::temperature(current.apparent_temperature, unit)
            );
            let _ = writeln!(
                out,
                "Condition: {}",
                code.map(|c| c.label().into_owned())
                    .unwrap_or_else(|| format::PLACEHOLDER.to_string())
            );
            let _ = writeln!(out, "Humidity: {}", format::humidity(current.humidity));
            let _ = writeln!(
                out,
                "Wind: {}",
                format::wind(current.wind_speed, current.wind_direction)
            );
            if let Some(observed) = current.observed_at() {
                let period = match current.is_day() {
                    Some(true) => " (day)",
                    Some(false) => " (night)",
                    None => "",
                };
                let _ = writeln!(out, "Observed: {}{}", observed.format("%Y-%m-%d %H:%M"), period);
            }
            if let Some(fetched_at) = model.fetched_at() {
                let _ = writeln!(
                    out,
                    "Updated: {}",
                    fetched_at.with_timezone(&Local).format("%H:%M")
                );
            }
        }
        (None, _) if !model.loading() => {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", EMPTY_HINT);
        }
        _ => {}
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RECENT_HEADING);
    if model.recent().is_empty() {
        let _ = writeln!(out, "  {}", NO_RECENT);
    } else {
        for (i, entry) in model.recent().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, format::recent_label(entry));
        }
    }

    out
}
