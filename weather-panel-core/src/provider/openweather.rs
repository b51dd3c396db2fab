use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;

use crate::model::WeatherSnapshot;

use super::WeatherFetcher;

#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    base_url: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    /// Full URL of the current-weather endpoint. The base URL is used verbatim.
    pub fn endpoint(&self) -> String {
        format!("{}weather", self.base_url)
    }

    async fn fetch_current(&self, query: &[(&str, &str)], what: &str) -> Result<WeatherSnapshot> {
        let url = self.endpoint();
        tracing::debug!(%url, what, "Requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request for {} failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        let snapshot = parsed.into_snapshot()?;
        tracing::info!(
            location = %snapshot.location_name,
            country = %snapshot.country,
            condition = %snapshot.condition,
            "Fetched current weather"
        );

        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    sys: OwSys,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| anyhow!("OpenWeather response contained no weather conditions"))?;

        Ok(WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            humidity_pct: self.main.humidity,
            wind_speed: self.wind.speed,
            condition,
            fetched_at: Utc::now(),
        })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn by_coordinates(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        let lat = lat.to_string();
        let lon = lon.to_string();
        let what = format!("lat={lat}, lon={lon}");

        self.fetch_current(&[("lat", lat.as_str()), ("lon", lon.as_str())], &what)
            .await
    }

    async fn by_city_name(&self, city: &str) -> Result<WeatherSnapshot> {
        self.fetch_current(&[("q", city)], city).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
