use crate::{
    Config, WeatherSnapshot,
    config::API_KEY_ENV,
    provider::openweather::OpenWeatherFetcher,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather, queried either by position or by city name.
///
/// Both entry points yield the same [`WeatherSnapshot`] shape. Implementations
/// issue exactly one request per call: no caching, no de-duplication.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn by_coordinates(&self, lat: f64, lon: f64) -> anyhow::Result<WeatherSnapshot>;

    async fn by_city_name(&self, city: &str) -> anyhow::Result<WeatherSnapshot>;
}

/// Construct the OpenWeather fetcher from config.
///
/// A missing API key only produces a warning; the provider rejects the
/// requests later.
pub fn fetcher_from_config(config: &Config) -> anyhow::Result<OpenWeatherFetcher> {
    if !config.has_api_key() {
        tracing::warn!(
            "No OpenWeather API key configured; requests will be rejected. \
             Set {API_KEY_ENV} or run `weather-panel configure`."
        );
    }
    OpenWeatherFetcher::new(config.base_url(), config.api_key())
}
