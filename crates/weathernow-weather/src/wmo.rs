//! WMO weather interpretation codes as used by Open-Meteo.
//! See: https://open-meteo.com/en/docs#weathervariables

use std::borrow::Cow;

/// Pictogram shown for codes outside the table.
pub const FALLBACK_PICTOGRAM: &str = "🌍";

/// Label and pictogram for a known code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeInfo {
    pub label: &'static str,
    pub pictogram: &'static str,
}

const fn info(label: &'static str, pictogram: &'static str) -> Option<WeatherCodeInfo> {
    Some(WeatherCodeInfo { label, pictogram })
}

/// A WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeatherCode(pub i32);

impl WeatherCode {
    /// Table entry for this code, `None` if the code is unknown.
    pub fn info(self) -> Option<WeatherCodeInfo> {
        match self.0 {
            0 => info("Clear sky", "☀️"),
            1 => info("Mainly clear", "🌤️"),
            2 => info("Partly cloudy", "⛅"),
            3 => info("Overcast", "☁️"),
            45 => info("Fog", "🌫️"),
            48 => info("Depositing rime fog", "🌫️"),
            51 => info("Light drizzle", "🌦️"),
            53 => info("Moderate drizzle", "🌦️"),
            55 => info("Dense drizzle", "🌧️"),
            56 => info("Light freezing drizzle", "🌨️"),
            57 => info("Dense freezing drizzle", "🌨️"),
            61 => info("Slight rain", "🌧️"),
            63 => info("Moderate rain", "🌧️"),
            65 => info("Heavy rain", "🌧️"),
            66 => info("Light freezing rain", "🌨️"),
            67 => info("Heavy freezing rain", "❄️"),
            71 => info("Slight snow fall", "🌨️"),
            73 => info("Moderate snow fall", "🌨️"),
            75 => info("Heavy snow fall", "❄️"),
            77 => info("Snow grains", "🌨️"),
            80 => info("Slight rain showers", "🌧️"),
            81 => info("Moderate rain showers", "🌧️"),
            82 => info("Violent rain showers", "⛈️"),
            85 => info("Slight snow showers", "🌨️"),
            86 => info("Heavy snow showers", "❄️"),
            95 => info("Thunderstorm", "⛈️"),
            96 => info("Thunderstorm w/ slight hail", "⛈️"),
            99 => info("Thunderstorm w/ heavy hail", "⛈️"),
            _ => None,
        }
    }

    /// Human-readable label, `Code {n}` for unknown codes.
    pub fn label(self) -> Cow<'static, str> {
        match self.info() {
            Some(info) => Cow::Borrowed(info.label),
            None => Cow::Owned(format!("Code {}", self.0)),
        }
    }

    /// Pictogram, the globe for unknown codes.
    pub fn pictogram(self) -> &'static str {
        self.info()
            .map(|info| info.pictogram)
            .unwrap_or(FALLBACK_PICTOGRAM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN: [i32; 28] = [
        0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82,
        85, 86, 95, 96, 99,
    ];

    #[test]
    fn test_all_provider_codes_are_known() {
        for code in KNOWN {
            assert!(WeatherCode(code).info().is_some(), "missing code {}", code);
        }
    }

    #[test]
    fn test_code_clear() {
        assert_eq!(WeatherCode(0).label(), "Clear sky");
        assert_eq!(WeatherCode(0).pictogram(), "☀️");
    }

    #[test]
    fn test_code_fog() {
        assert_eq!(WeatherCode(45).label(), "Fog");
        assert_eq!(WeatherCode(48).label(), "Depositing rime fog");
    }

    #[test]
    fn test_code_thunderstorm() {
        assert_eq!(WeatherCode(95).label(), "Thunderstorm");
        assert_eq!(WeatherCode(99).label(), "Thunderstorm w/ heavy hail");
        assert_eq!(WeatherCode(99).pictogram(), "⛈️");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        for code in [4, 44, 100, 999, -1] {
            assert_eq!(WeatherCode(code).info(), None);
            assert_eq!(WeatherCode(code).label(), format!("Code {}", code));
            assert_eq!(WeatherCode(code).pictogram(), FALLBACK_PICTOGRAM);
        }
    }
}
