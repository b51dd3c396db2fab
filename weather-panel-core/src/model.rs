use chrono::{DateTime, Utc};

/// Geographic position reported by a [`crate::location::LocationSource`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// The last successfully fetched weather record.
///
/// Built in one piece from a single provider response and replaced wholesale
/// by the next one; fields are never patched individually.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    /// Relative humidity, 0-100. Providers may send fractional values.
    pub humidity_pct: f64,
    pub wind_speed: f64,
    /// Primary condition keyword as sent by the provider, e.g. "Rain".
    pub condition: String,
    pub fetched_at: DateTime<Utc>,
}
