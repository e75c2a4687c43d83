use serde::{Deserialize, Serialize};

/// Display language for user-facing strings and time formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

/// Which fetch operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Current,
    Forecast,
    Location,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Id => "id",
        }
    }

    pub const fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Id]
    }

    /// Static message stored in the dashboard state when a fetch fails.
    pub fn failure_message(&self, kind: FailureKind) -> &'static str {
        match (self, kind) {
            (Locale::En, FailureKind::Current) => {
                "Failed to fetch weather data. Check the city name and try again."
            }
            (Locale::En, FailureKind::Forecast) => "Failed to fetch forecast data.",
            (Locale::En, FailureKind::Location) => "Failed to get your location or weather data.",
            (Locale::Id, FailureKind::Current) => {
                "Gagal mendapatkan data cuaca. Periksa nama kota dan coba lagi."
            }
            (Locale::Id, FailureKind::Forecast) => "Gagal mendapatkan data prakiraan cuaca.",
            (Locale::Id, FailureKind::Location) => "Gagal mendapatkan lokasi atau data cuaca.",
        }
    }

    /// `chrono` format string for a short hour:minute time.
    pub fn short_time_format(&self) -> &'static str {
        match self {
            Locale::En => "%H:%M",
            Locale::Id => "%H.%M",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
