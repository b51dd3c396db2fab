//! Text the panel shows for a given display state.

use std::fmt;

use crate::{
    condition::{ConditionStyle, condition_style},
    model::WeatherSnapshot,
    panel::Display,
};

pub const LOADING_TEXT: &str = "Loading";

/// Formatted fields of a ready panel.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub location_name: String,
    pub country: String,
    pub style: ConditionStyle,
    /// Rounded to whole degrees, e.g. "5°C".
    pub temperature: String,
    pub condition: String,
    pub humidity: String,
    pub wind: String,
}

impl WeatherView {
    pub fn from_snapshot(snapshot: &WeatherSnapshot) -> Self {
        Self {
            location_name: snapshot.location_name.clone(),
            country: snapshot.country.clone(),
            style: condition_style(&snapshot.condition),
            temperature: format!("{}°C", format_rounded(snapshot.temperature_c)),
            condition: snapshot.condition.clone(),
            humidity: format!("{}%", snapshot.humidity_pct),
            wind: format!("{}km/h", snapshot.wind_speed),
        }
    }
}

impl fmt::Display for WeatherView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.location_name)?;
        writeln!(f, "{}", self.country)?;
        writeln!(
            f,
            "{} [{} {}]",
            self.style.icon.glyph(),
            self.style.icon,
            self.style.color
        )?;
        writeln!(f, "{}", self.temperature)?;
        writeln!(f, "{}", self.condition)?;
        writeln!(f, "Humidity {}", self.humidity)?;
        write!(f, "Wind {}", self.wind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Loading,
    Ready(WeatherView),
}

impl PanelView {
    pub fn render(display: Display<'_>) -> Self {
        match display {
            Display::Loading => PanelView::Loading,
            Display::Ready(snapshot) => PanelView::Ready(WeatherView::from_snapshot(snapshot)),
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::Loading => f.write_str(LOADING_TEXT),
            PanelView::Ready(view) => fmt::Display::fmt(view, f),
        }
    }
}

/// Whole-degree rounding, half away from zero.
///
/// Any negative input keeps its sign, so -0.2 renders as "-0"; an exact
/// zero (either sign) renders as "0".
fn format_rounded(value: f64) -> String {
    let magnitude = format!("{:.0}", value.abs().round());
    if value < 0.0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Icon;
    use chrono::Utc;

    fn oslo() -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: "Oslo".into(),
            country: "NO".into(),
            temperature_c: 5.2,
            humidity_pct: 80.0,
            wind_speed: 12.0,
            condition: "Rain".into(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn ready_view_formats_fields() {
        let view = WeatherView::from_snapshot(&oslo());

        assert_eq!(view.location_name, "Oslo");
        assert_eq!(view.country, "NO");
        assert_eq!(view.temperature, "5°C");
        assert_eq!(view.style.icon, Icon::Rain);
        assert_eq!(view.humidity, "80%");
        assert_eq!(view.wind, "12km/h");
    }

    #[test]
    fn fractional_wind_is_kept() {
        let mut snapshot = oslo();
        snapshot.wind_speed = 3.6;
        assert_eq!(WeatherView::from_snapshot(&snapshot).wind, "3.6km/h");
    }

    #[test]
    fn fractional_humidity_is_kept() {
        let mut snapshot = oslo();
        snapshot.humidity_pct = 65.5;
        assert_eq!(WeatherView::from_snapshot(&snapshot).humidity, "65.5%");
    }

    #[test]
    fn temperature_rounding() {
        assert_eq!(format_rounded(5.2), "5");
        assert_eq!(format_rounded(5.5), "6");
        assert_eq!(format_rounded(-3.7), "-4");
        assert_eq!(format_rounded(-2.5), "-3");
        assert_eq!(format_rounded(-0.2), "-0");
        assert_eq!(format_rounded(-0.4), "-0");
        assert_eq!(format_rounded(0.0), "0");
        assert_eq!(format_rounded(-0.0), "0");
        assert_eq!(format_rounded(0.4), "0");
    }

    #[test]
    fn loading_display_renders_loading() {
        let view = PanelView::render(Display::Loading);
        assert_eq!(view, PanelView::Loading);
        assert_eq!(view.to_string(), "Loading");
    }

    #[test]
    fn ready_text_contains_every_field() {
        let snapshot = oslo();
        let text = PanelView::render(Display::Ready(&snapshot)).to_string();

        for needle in ["Oslo", "NO", "5°C", "cloud-rain-fill", "#272829", "Rain", "80%", "12km/h"] {
            assert!(text.contains(needle), "missing {needle:?} in {text}");
        }
    }
}
