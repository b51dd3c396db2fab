use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use weather_panel_core::{
    Config, Coordinates, Display, FixedLocation, IpLocator, LocationSource, PanelEvent, PanelView,
    WeatherPanel, config::DEFAULT_BASE_URL, fetcher_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-panel", version, about = "Current weather panel")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the OpenWeather API key and endpoint.
    Configure,

    /// Show the weather at the current position.
    Show {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Show the weather at the current position, then search cities by name.
    Run {
        #[command(flatten)]
        position: PositionArgs,
    },
}

/// Fixed position; when absent the position is looked up by IP address.
#[derive(Debug, Args)]
pub struct PositionArgs {
    /// Latitude in decimal degrees.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl PositionArgs {
    fn location_source(&self, config: &Config) -> Arc<dyn LocationSource> {
        let fixed = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => config.coordinates(),
        };

        match fixed {
            Some(coords) => Arc::new(FixedLocation(coords)),
            None => Arc::new(IpLocator::new()),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { position } => show(position).await,
            Command::Run { position } => interactive(position).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let base_url = Text::new("API base URL:")
        .with_default(cfg.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()
        .context("Failed to read base URL")?;

    cfg.set_api_key(&api_key);
    cfg.base_url = Some(base_url.trim().to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn build_panel(position: &PositionArgs) -> anyhow::Result<WeatherPanel> {
    let cfg = Config::load()?;
    let fetcher = fetcher_from_config(&cfg)?;
    tracing::debug!(endpoint = %fetcher.endpoint(), "Mounting weather panel");

    let mut panel = WeatherPanel::new(Arc::new(fetcher));
    panel.mount(position.location_source(&cfg));
    Ok(panel)
}

async fn show(position: PositionArgs) -> anyhow::Result<()> {
    let mut panel = build_panel(&position)?;

    while let Some(event) = panel.next_event().await {
        if matches!(
            event,
            PanelEvent::InitialLoaded(_) | PanelEvent::InitialFailed(_)
        ) {
            break;
        }
    }

    print_panel(&panel);
    Ok(())
}

async fn interactive(position: PositionArgs) -> anyhow::Result<()> {
    let mut panel = build_panel(&position)?;

    loop {
        panel.drain_ready();
        print_panel(&panel);

        let prompt = tokio::task::spawn_blocking(|| {
            Text::new("City:")
                .with_help_message("Enter to search, Esc to quit")
                .prompt()
        })
        .await
        .context("City prompt task failed")?;

        let city = match prompt {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        };

        panel.set_query(city);
        if !panel.search() {
            continue;
        }

        while let Some(event) = panel.next_event().await {
            if matches!(
                event,
                PanelEvent::SearchLoaded(_) | PanelEvent::SearchFailed(_)
            ) {
                break;
            }
        }
    }

    Ok(())
}

fn print_panel(panel: &WeatherPanel) {
    println!();
    println!("{}", PanelView::render(panel.display()));

    if let Display::Ready(snapshot) = panel.display() {
        let updated = snapshot.fetched_at.with_timezone(&Local);
        println!("Updated {}", updated.format("%H:%M:%S"));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather-panel", "show", "--lat", "-33.87", "--lon", "151.21"])
            .expect("valid args");

        let Command::Show { position } = cli.command else {
            panic!("expected show");
        };
        assert_eq!(position.lat, Some(-33.87));
        assert_eq!(position.lon, Some(151.21));
    }

    #[test]
    fn lat_requires_lon() {
        let res = Cli::try_parse_from(["weather-panel", "run", "--lat", "10"]);
        assert!(res.is_err());
    }

    #[test]
    fn parses_configure() {
        let cli = Cli::try_parse_from(["weather-panel", "configure"]).expect("valid args");
        assert!(matches!(cli.command, Command::Configure));
    }

    #[test]
    fn flags_take_precedence_over_config_position() {
        let position = PositionArgs {
            lat: Some(1.0),
            lon: Some(2.0),
        };
        let cfg = Config {
            latitude: Some(3.0),
            longitude: Some(4.0),
            ..Config::default()
        };

        let source = position.location_source(&cfg);
        assert!(format!("{source:?}").contains("1.0"));
    }
}
