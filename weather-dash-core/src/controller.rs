//! Fetch orchestration and the derived fields the dashboard displays.
//!
//! Every fetch takes `&mut self`, so one controller never has two fetches in
//! flight; callers that want parallel lookups need separate controllers.

use chrono::{DateTime, Local, TimeZone, Utc};
use tracing::{error, info, warn};

use crate::{
    client::{OpenWeatherClient, WeatherApi},
    config::{Config, DisplayConfig},
    error::FetchError,
    forecast::{IconStyle, daily_summaries},
    location::Geolocator,
    messages::FailureKind,
    model::{CurrentWeather, DailySummary, icon_url, round_temp},
    state::{AppState, SearchHistory},
    storage::{KeyValueStore, SEARCH_HISTORY_KEY, SELECTED_CITY_KEY},
};

#[derive(Debug)]
pub struct WeatherController {
    client: Box<dyn WeatherApi>,
    geolocator: Box<dyn Geolocator>,
    store: Box<dyn KeyValueStore>,
    display: DisplayConfig,
    state: AppState,
}

impl WeatherController {
    pub fn new(
        client: Box<dyn WeatherApi>,
        geolocator: Box<dyn Geolocator>,
        store: Box<dyn KeyValueStore>,
        display: DisplayConfig,
    ) -> Self {
        Self { client, geolocator, store, display, state: AppState::default() }
    }

    /// Controller backed by the OpenWeather client described in `config`.
    pub fn from_config(
        config: &Config,
        geolocator: Box<dyn Geolocator>,
        store: Box<dyn KeyValueStore>,
    ) -> anyhow::Result<Self> {
        let client = OpenWeatherClient::from_config(config)?;
        Ok(Self::new(Box::new(client), geolocator, store, config.display.clone()))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> WeatherView<'_> {
        WeatherView { state: &self.state, display: &self.display }
    }

    /// Fetch current conditions for `city`. Blank input is ignored entirely.
    pub async fn fetch_current(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.begin();
        self.state.selected_city = city.to_string();

        match self.client.current_by_city(city).await {
            Ok(current) => {
                info!(city, "current weather updated");
                self.state.current_weather = Some(current);
                self.state.last_updated = Some(Utc::now());
                self.state.search_history.record(city);
                self.save();
            }
            Err(e) => self.fail(FailureKind::Current, &FetchError::from(e)),
        }

        self.state.loading = false;
    }

    /// Fetch the 5-day forecast samples for `city`. Blank input is ignored.
    pub async fn fetch_forecast(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.begin();

        match self.client.forecast_by_city(city).await {
            Ok(samples) => {
                info!(city, samples = samples.len(), "forecast updated");
                self.state.forecast = Some(samples);
            }
            Err(e) => self.fail(FailureKind::Forecast, &FetchError::from(e)),
        }

        self.state.loading = false;
    }

    /// Current conditions, then the forecast only if the first fetch succeeded.
    pub async fn fetch_current_and_forecast(&mut self, city: &str) {
        self.fetch_current(city).await;
        if self.state.error.is_none() {
            self.fetch_forecast(city).await;
        }
    }

    /// Current conditions at the device position, then the forecast for the
    /// city the provider resolved those coordinates to.
    pub async fn fetch_by_geolocation(&mut self) {
        self.begin();

        match self.current_at_device_position().await {
            Ok(current) => {
                let city = current.city_name.clone();
                info!(city = %city, "current weather updated from device position");
                self.state.current_weather = Some(current);
                self.state.last_updated = Some(Utc::now());
                self.state.selected_city = city.clone();

                self.fetch_forecast(&city).await;
                self.save();
            }
            Err(e) => self.fail(FailureKind::Location, &e),
        }

        self.state.loading = false;
    }

    async fn current_at_device_position(&self) -> Result<CurrentWeather, FetchError> {
        let coords = self.geolocator.current_position().await?;
        Ok(self.client.current_by_coords(coords).await?)
    }

    /// Persist the selected city and search history. Failures are logged only.
    pub fn save(&mut self) {
        if let Err(e) = self.store.set(SELECTED_CITY_KEY, &self.state.selected_city) {
            warn!(error = %e, "failed to save selected city");
        }

        let history = match serde_json::to_string(&self.state.search_history) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to encode search history");
                return;
            }
        };
        if let Err(e) = self.store.set(SEARCH_HISTORY_KEY, &history) {
            warn!(error = %e, "failed to save search history");
        }
    }

    /// Restore the search history and, if a city was saved, refresh it.
    pub async fn load(&mut self) {
        self.restore_history();

        if let Some(city) = self.saved_city() {
            info!(city = %city, "restoring last selected city");
            self.fetch_current_and_forecast(&city).await;
        }
    }

    /// Replace the in-memory history with the stored one. Unreadable data
    /// leaves an empty history.
    pub fn restore_history(&mut self) {
        match self.store.get(SEARCH_HISTORY_KEY) {
            Ok(Some(raw)) => {
                self.state.search_history =
                    serde_json::from_str::<SearchHistory>(&raw).unwrap_or_else(|e| {
                        warn!(error = %e, "stored search history is unreadable, starting empty");
                        SearchHistory::default()
                    });
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "failed to read search history"),
        }
    }

    /// Last selected city from storage, if any.
    pub fn saved_city(&self) -> Option<String> {
        match self.store.get(SELECTED_CITY_KEY) {
            Ok(city) => city.filter(|c| !c.trim().is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read last selected city");
                None
            }
        }
    }

    fn begin(&mut self) {
        self.state.loading = true;
        self.state.error = None;
    }

    fn fail(&mut self, kind: FailureKind, err: &FetchError) {
        error!(error = %err, operation = ?kind, "weather fetch failed");
        self.state.error = Some(self.display.locale.failure_message(kind).to_string());
    }
}

/// Display fields computed from the current state on every call.
#[derive(Debug, Clone, Copy)]
pub struct WeatherView<'a> {
    state: &'a AppState,
    display: &'a DisplayConfig,
}

impl<'a> WeatherView<'a> {
    fn current(&self) -> Option<&'a CurrentWeather> {
        self.state.current_weather.as_ref()
    }

    pub fn temperature(&self) -> Option<i32> {
        self.current().map(|c| round_temp(c.temperature_c))
    }

    pub fn condition(&self) -> Option<&'a str> {
        self.current().map(|c| c.condition.as_str())
    }

    pub fn description(&self) -> Option<&'a str> {
        self.current().map(|c| c.description.as_str())
    }

    pub fn icon_url(&self) -> Option<String> {
        self.current()
            .map(|c| icon_url(&self.display.icon_base_url, &c.icon_code, self.display.icon_size))
    }

    pub fn humidity(&self) -> Option<u8> {
        self.current().map(|c| c.humidity_pct)
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.current().map(|c| c.wind_speed_mps)
    }

    pub fn feels_like(&self) -> Option<i32> {
        self.current().map(|c| round_temp(c.feels_like_c))
    }

    pub fn city_name(&self) -> Option<&'a str> {
        self.current().map(|c| c.city_name.as_str())
    }

    pub fn country_code(&self) -> Option<&'a str> {
        self.current().map(|c| c.country_code.as_str())
    }

    pub fn formatted_last_updated(&self) -> Option<String> {
        self.formatted_last_updated_in(&Local)
    }

    pub fn formatted_last_updated_in<Tz>(&self, tz: &Tz) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let fmt = self.display.locale.short_time_format();
        self.state.last_updated.map(|t| t.with_timezone(tz).format(fmt).to_string())
    }

    pub fn daily_forecast(&self) -> Vec<DailySummary> {
        self.daily_forecast_at(&Local::now())
    }

    pub fn daily_forecast_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DailySummary> {
        let icon = IconStyle { base_url: &self.display.icon_base_url, size: self.display.icon_size };
        self.state
            .forecast
            .as_deref()
            .map(|samples| daily_summaries(samples, now, icon))
            .unwrap_or_default()
    }
}
