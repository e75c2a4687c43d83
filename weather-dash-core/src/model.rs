use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for one place, as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub condition: String,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub city_name: String,
    pub country_code: String,
    pub feels_like_c: f64,
}

/// One 3-hour step of the provider's 5-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_c: f64,
    pub weather_main: String,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

/// A forecast day condensed for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub max_temp: i32,
    pub min_temp: i32,
    pub icon_url: String,
    pub description: String,
    pub wind_speed_mps: f64,
    pub humidity_pct: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IconSize {
    #[serde(rename = "1x")]
    Standard,
    #[default]
    #[serde(rename = "2x")]
    Large,
}

/// Build the provider icon URL for `icon_code`. The URL is never fetched here.
pub fn icon_url(base: &str, icon_code: &str, size: IconSize) -> String {
    let base = base.trim_end_matches('/');
    match size {
        IconSize::Standard => format!("{base}/{icon_code}.png"),
        IconSize::Large => format!("{base}/{icon_code}@2x.png"),
    }
}

/// Round a temperature for display. Ties go toward positive infinity, so
/// -2.5 becomes -2 and 2.5 becomes 3.
pub fn round_temp(value: f64) -> i32 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_variants() {
        let base = "https://openweathermap.org/img/wn";
        assert_eq!(
            icon_url(base, "10d", IconSize::Large),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
        assert_eq!(
            icon_url(base, "01n", IconSize::Standard),
            "https://openweathermap.org/img/wn/01n.png"
        );
    }

    #[test]
    fn icon_url_tolerates_trailing_slash() {
        assert_eq!(icon_url("http://x/img/", "04d", IconSize::Large), "http://x/img/04d@2x.png");
    }

    #[test]
    fn round_temp_ties_go_up() {
        assert_eq!(round_temp(2.5), 3);
        assert_eq!(round_temp(-2.5), -2);
        assert_eq!(round_temp(24.49), 24);
        assert_eq!(round_temp(-0.6), -1);
    }

    #[test]
    fn round_temp_does_not_round_up_just_below_half() {
        assert_eq!(round_temp(0.49999999999999994), 0);
        assert_eq!(round_temp(-0.5000000000000001), -1);
    }

    #[test]
    fn icon_size_serde_names() {
        let s: IconSize = serde_json::from_str("\"1x\"").unwrap();
        assert_eq!(s, IconSize::Standard);
        assert_eq!(serde_json::to_string(&IconSize::Large).unwrap(), "\"2x\"");
    }
}
