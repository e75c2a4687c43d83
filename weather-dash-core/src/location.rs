use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;
use tracing::debug;

use crate::{config::Config, error::LocationError, model::Coordinates};

/// Source of the device's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Always answers with the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// No location source on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

#[async_trait]
impl Geolocator for Unsupported {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Approximate position from the public IP address (ip-api.com response format).
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.geolocation_url.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        debug!(url = %self.url, "resolving position from IP address");

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Position(e.to_string()))?;

        if !res.status().is_success() {
            return Err(LocationError::Position(format!(
                "lookup failed with status {}",
                res.status()
            )));
        }

        let body: IpApiResponse =
            res.json().await.map_err(|e| LocationError::Position(e.to_string()))?;

        match body {
            IpApiResponse { status, lat: Some(lat), lon: Some(lon), .. } if status == "success" => {
                Ok(Coordinates::new(lat, lon))
            }
            IpApiResponse { message, .. } => Err(LocationError::Position(
                message.unwrap_or_else(|| "lookup returned no coordinates".to_string()),
            )),
        }
    }
}
