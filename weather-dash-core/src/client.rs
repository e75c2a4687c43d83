use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use std::fmt::Debug;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::ClientError,
    model::{Coordinates, CurrentWeather, ForecastSample},
};

/// The three provider lookups the dashboard needs.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, ClientError>;

    async fn forecast_by_city(&self, city: &str) -> Result<Vec<ForecastSample>, ClientError>;

    async fn current_by_coords(&self, coords: Coordinates) -> Result<CurrentWeather, ClientError>;
}

/// OpenWeather 2.5 REST client. Every request carries the API key and metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self::with_http(api_key, base_url, Client::new())
    }

    pub fn with_http(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http }
    }

    /// Build a client from config, honouring the optional request timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.require_api_key()?.to_owned();

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self::with_http(api_key, config.base_url.as_str(), http))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        params: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?params, "requesting provider");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|source| ClientError::Request { endpoint, source })?;

        let status = res.status();
        let body = res.text().await.map_err(|source| ClientError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(ClientError::Status { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current_by_city(&self, city: &str) -> Result<CurrentWeather, ClientError> {
        let parsed: OwCurrentResponse = self.get("weather", &[("q", city.to_string())]).await?;
        current_weather("weather", parsed)
    }

    async fn forecast_by_city(&self, city: &str) -> Result<Vec<ForecastSample>, ClientError> {
        let parsed: OwForecastResponse = self.get("forecast", &[("q", city.to_string())]).await?;
        let samples = parsed
            .list
            .into_iter()
            .filter_map(|entry| {
                let dt = entry.dt;
                let sample = entry.into_sample();
                if sample.is_none() {
                    warn!(dt, "dropping forecast entry with bad timestamp or no weather condition");
                }
                sample
            })
            .collect();
        Ok(samples)
    }

    async fn current_by_coords(&self, coords: Coordinates) -> Result<CurrentWeather, ClientError> {
        let parsed: OwCurrentResponse = self
            .get(
                "weather",
                &[("lat", coords.latitude.to_string()), ("lon", coords.longitude.to_string())],
            )
            .await?;
        current_weather("weather", parsed)
    }
}

fn current_weather(
    endpoint: &'static str,
    parsed: OwCurrentResponse,
) -> Result<CurrentWeather, ClientError> {
    CurrentWeather::try_from(parsed).map_err(|reason| ClientError::Malformed { endpoint, reason })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: Option<f64>,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
}

impl TryFrom<OwCurrentResponse> for CurrentWeather {
    type Error = &'static str;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed.weather.into_iter().next().ok_or("no weather condition")?;

        Ok(CurrentWeather {
            temperature_c: parsed.main.temp,
            condition: weather.main,
            description: weather.description,
            icon_code: weather.icon,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            city_name: parsed.name,
            country_code: parsed.sys.country,
            feels_like_c: parsed.main.feels_like.unwrap_or(parsed.main.temp),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwForecastEntry {
    fn into_sample(self) -> Option<ForecastSample> {
        let timestamp = unix_to_utc(self.dt)?;
        let weather = self.weather.into_iter().next()?;

        Some(ForecastSample {
            timestamp,
            temperature_c: self.main.temp,
            weather_main: weather.main,
            description: weather.description,
            icon_code: weather.icon,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
