//! Display helpers shared by every front end.

use crate::types::{LocationCandidate, RecentLocation, TemperatureUnit};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "-";

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Temperature in the given unit with one decimal and symbol, e.g. `64.4°F`.
pub fn temperature(celsius: Option<f64>, unit: TemperatureUnit) -> String {
    match celsius {
        Some(c) => format!("{:.1}{}", unit.from_celsius(c), unit.symbol()),
        None => PLACEHOLDER.to_string(),
    }
}

/// 16-point compass label for a wind direction in degrees.
pub fn wind_direction(degrees: Option<f64>) -> &'static str {
    match degrees {
        Some(deg) if deg.is_finite() => {
            let sector = (deg.rem_euclid(360.0) / 22.5).round() as usize % 16;
            COMPASS_POINTS[sector]
        }
        _ => PLACEHOLDER,
    }
}

/// Wind speed with compass direction, e.g. `11.2 km/h WSW`.
pub fn wind(speed_kmh: Option<f64>, degrees: Option<f64>) -> String {
    let speed = speed_kmh
        .map(|s| s.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    format!("{} km/h {}", speed, wind_direction(degrees))
}

pub fn humidity(percent: Option<f64>) -> String {
    match percent {
        Some(h) => format!("{}%", h),
        None => PLACEHOLDER.to_string(),
    }
}

/// Heading for the result card: `name • region • country`, empty parts omitted.
pub fn place_heading(place: &LocationCandidate) -> String {
    [place.name.as_str(), place.admin1.as_str(), place.country.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn coordinates(latitude: f64, longitude: f64) -> String {
    format!("Latitude {:.2}, Longitude {:.2}", latitude, longitude)
}

fn list_label(name: &str, admin1: &str, country: &str) -> String {
    let mut label = name.to_string();
    if !admin1.is_empty() {
        label.push_str(", ");
        label.push_str(admin1);
    }
    if !country.is_empty() {
        label.push(' ');
        label.push_str(country);
    }
    label
}

/// One line in the candidate list, e.g. `Paris, Île-de-France France`.
pub fn candidate_label(place: &LocationCandidate) -> String {
    list_label(&place.name, &place.admin1, &place.country)
}

/// One line in the recent-search list.
pub fn recent_label(entry: &RecentLocation) -> String {
    list_label(&entry.name, &entry.admin1, &entry.country)
}

/// Caption for the unit toggle, describing what pressing it does.
pub fn unit_toggle_caption(unit: TemperatureUnit) -> &'static str {
    match unit {
        TemperatureUnit::Celsius => "°C → °F",
        TemperatureUnit::Fahrenheit => "°F → °C",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> LocationCandidate {
        LocationCandidate {
            id: Some(2988507),
            name: "Paris".into(),
            country: "France".into(),
            admin1: "Île-de-France".into(),
            latitude: 48.85341,
            longitude: 2.3488,
        }
    }

    #[test]
    fn test_temperature_formatting() {
        assert_eq!(temperature(Some(18.0), TemperatureUnit::Celsius), "18.0°C");
        assert_eq!(temperature(Some(18.0), TemperatureUnit::Fahrenheit), "64.4°F");
        assert_eq!(temperature(Some(-3.24), TemperatureUnit::Celsius), "-3.2°C");
        assert_eq!(temperature(None, TemperatureUnit::Fahrenheit), "-");
    }

    #[test]
    fn test_toggle_twice_restores_display() {
        let unit = TemperatureUnit::Celsius;
        for c in [-12.3, 0.0, 7.77, 21.5, 38.9] {
            let before = temperature(Some(c), unit);
            let fahrenheit = unit.toggled().from_celsius(c);
            let back = (fahrenheit - 32.0) * 5.0 / 9.0;
            let after = temperature(Some(back), unit.toggled().toggled());
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_cardinal_directions() {
        assert_eq!(wind_direction(Some(0.0)), "N");
        assert_eq!(wind_direction(Some(90.0)), "E");
        assert_eq!(wind_direction(Some(180.0)), "S");
        assert_eq!(wind_direction(Some(270.0)), "W");
        assert_eq!(wind_direction(Some(360.0)), "N");
    }

    #[test]
    fn test_intermediate_directions() {
        assert_eq!(wind_direction(Some(22.5)), "NNE");
        assert_eq!(wind_direction(Some(45.0)), "NE");
        assert_eq!(wind_direction(Some(245.0)), "WSW");
        assert_eq!(wind_direction(Some(350.0)), "N");
        assert_eq!(wind_direction(Some(337.0)), "NNW");
        assert_eq!(wind_direction(Some(725.0)), "N");
    }

    #[test]
    fn test_missing_direction_placeholder() {
        assert_eq!(wind_direction(None), "-");
        assert_eq!(wind_direction(Some(f64::NAN)), "-");
        assert_eq!(wind(None, None), "- km/h -");
    }

    #[test]
    fn test_wind_and_humidity() {
        assert_eq!(wind(Some(11.2), Some(90.0)), "11.2 km/h E");
        assert_eq!(humidity(Some(62.0)), "62%");
        assert_eq!(humidity(None), "-");
    }

    #[test]
    fn test_place_labels() {
        let p = paris();
        assert_eq!(place_heading(&p), "Paris • Île-de-France • France");
        assert_eq!(candidate_label(&p), "Paris, Île-de-France France");
        assert_eq!(recent_label(&RecentLocation::from(&p)), "Paris, Île-de-France France");

        let here = LocationCandidate::current_position(1.0, 2.0);
        assert_eq!(place_heading(&here), "Your location");
        assert_eq!(candidate_label(&here), "Your location");
    }

    #[test]
    fn test_coordinates_two_decimals() {
        assert_eq!(coordinates(48.85341, 2.3488), "Latitude 48.85, Longitude 2.35");
    }

    #[test]
    fn test_unit_toggle_caption() {
        assert_eq!(unit_toggle_caption(TemperatureUnit::Celsius), "°C → °F");
        assert_eq!(unit_toggle_caption(TemperatureUnit::Fahrenheit), "°F → °C");
    }
}
