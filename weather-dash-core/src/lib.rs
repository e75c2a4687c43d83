//! Core library for the `weather-dash` dashboard.
//!
//! This crate defines:
//! - The OpenWeather client and the geolocation capability
//! - The fetch controller owning the dashboard state
//! - Forecast aggregation into daily summaries
//! - Best-effort persistence of the last city and search history
//! - Configuration & credentials handling
//!
//! It is used by `weather-dash-cli`, but any front end can drive a
//! [`WeatherController`] and render its [`WeatherView`].

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod forecast;
pub mod location;
pub mod messages;
pub mod model;
pub mod state;
pub mod storage;

pub use client::{OpenWeatherClient, WeatherApi};
pub use config::{Config, DisplayConfig};
pub use controller::{WeatherController, WeatherView};
pub use error::{ClientError, FetchError, LocationError, StorageError};
pub use location::{FixedLocation, Geolocator, IpGeolocator, Unsupported};
pub use messages::{FailureKind, Locale};
pub use model::{Coordinates, CurrentWeather, DailySummary, ForecastSample, IconSize};
pub use state::{AppState, SearchHistory};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
