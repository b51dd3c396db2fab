//! Core library for the weather panel.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Position lookup and the OpenWeather fetcher
//! - Condition keyword to icon/colour mapping
//! - The panel's display state and the text it renders
//!
//! It is used by `weather-panel-cli`, but can also be embedded in other front ends.

pub mod condition;
pub mod config;
pub mod location;
pub mod model;
pub mod panel;
pub mod provider;
pub mod view;

pub use condition::{ConditionStyle, Icon, condition_style};
pub use config::Config;
pub use location::{FixedLocation, IpLocator, LocationError, LocationSource};
pub use model::{Coordinates, WeatherSnapshot};
pub use panel::{Display, PanelEvent, PanelState, WeatherPanel};
pub use provider::{WeatherFetcher, fetcher_from_config, openweather::OpenWeatherFetcher};
pub use view::{PanelView, WeatherView};
