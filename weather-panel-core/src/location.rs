//! Resolution of the device's position.
//!
//! A terminal has no browser geolocation API, so the host capability is
//! either a position fixed by the user or a lookup by public IP address.
//! Callers ask exactly once; there is no retry and no timeout.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::model::Coordinates;

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable: {0}")]
    Unavailable(String),
    #[error("Location request failed: {0}")]
    Network(#[from] reqwest::Error),
}

#[async_trait]
pub trait LocationSource: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position supplied up front (command line or config file).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_IP_LOOKUP_URL)
    }

    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            http: Client::new(),
        }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationSource for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        tracing::debug!(url = %self.url, "Looking up position by IP address");

        let res = self.http.get(&self.url).send().await?;

        if res.status() == reqwest::StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !res.status().is_success() {
            return Err(LocationError::Unavailable(format!(
                "lookup returned status {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res.json().await?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => {
                tracing::info!(lat, lon, "Resolved position");
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(LocationError::Unavailable(
                body.message
                    .unwrap_or_else(|| format!("lookup status '{}'", body.status)),
            )),
        }
    }
}
