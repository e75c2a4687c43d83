use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CurrentWeather, ForecastSample};

/// Maximum number of cities kept in the search history.
pub const HISTORY_LIMIT: usize = 5;

/// Everything the dashboard shows, owned by one controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub current_weather: Option<CurrentWeather>,
    pub forecast: Option<Vec<ForecastSample>>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_history: SearchHistory,
    pub selected_city: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Recently fetched cities, most recent first, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SearchHistory(Vec<String>);

impl SearchHistory {
    /// Move `city` to the front, dropping the oldest entry past [`HISTORY_LIMIT`].
    pub fn record(&mut self, city: &str) {
        self.0.retain(|c| c != city);
        self.0.insert(0, city.to_string());
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for SearchHistory {
    /// Rebuild from stored data, re-applying the uniqueness and length rules.
    fn from(cities: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(HISTORY_LIMIT);
        for city in cities {
            if unique.len() == HISTORY_LIMIT {
                break;
            }
            if !city.is_empty() && !unique.contains(&city) {
                unique.push(city);
            }
        }
        Self(unique)
    }
}

impl From<SearchHistory> for Vec<String> {
    fn from(history: SearchHistory) -> Self {
        history.0
    }
}
