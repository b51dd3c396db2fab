//! Mapping from provider condition keywords to the icon and colour the
//! panel draws.

/// Icons the panel can show next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Rain,
    Sun,
    Cloud,
    Fog,
    PartlySunny,
}

impl Icon {
    /// Icon identifier in the icon set.
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Rain => "cloud-rain-fill",
            Icon::Sun => "sun-fill",
            Icon::Cloud => "cloudy-fill",
            Icon::Fog => "cloud-fog2-fill",
            Icon::PartlySunny => "weather-partly-sunny",
        }
    }

    /// Terminal stand-in for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Rain => "🌧",
            Icon::Sun => "☀",
            Icon::Cloud => "☁",
            Icon::Fog => "🌫",
            Icon::PartlySunny => "⛅",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionStyle {
    pub icon: Icon,
    /// CSS-style hex colour.
    pub color: &'static str,
}

pub const FALLBACK_STYLE: ConditionStyle = ConditionStyle {
    icon: Icon::PartlySunny,
    color: "#7b2869",
};

/// Look up the style for a condition keyword.
///
/// Matching is exact and case-sensitive; every keyword outside the table,
/// including the empty string, gets [`FALLBACK_STYLE`].
pub fn condition_style(keyword: &str) -> ConditionStyle {
    match keyword {
        "Rain" => ConditionStyle {
            icon: Icon::Rain,
            color: "#272829",
        },
        "Clear" => ConditionStyle {
            icon: Icon::Sun,
            color: "#ffc436",
        },
        "Clouds" => ConditionStyle {
            icon: Icon::Cloud,
            color: "#102c57",
        },
        "Mist" => ConditionStyle {
            icon: Icon::Fog,
            color: "#279EFF",
        },
        _ => FALLBACK_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keywords_map_to_their_style() {
        let cases = [
            ("Rain", Icon::Rain, "#272829"),
            ("Clear", Icon::Sun, "#ffc436"),
            ("Clouds", Icon::Cloud, "#102c57"),
            ("Mist", Icon::Fog, "#279EFF"),
        ];

        for (keyword, icon, color) in cases {
            let style = condition_style(keyword);
            assert_eq!(style.icon, icon, "icon for {keyword}");
            assert_eq!(style.color, color, "color for {keyword}");
        }
    }

    #[test]
    fn unknown_keywords_fall_back() {
        for keyword in ["Tornado", "", "clear", "RAIN", " Rain", "Snow", "Drizzle"] {
            assert_eq!(condition_style(keyword), FALLBACK_STYLE, "keyword {keyword:?}");
        }
    }

    #[test]
    fn fallback_is_partly_sunny_purple() {
        assert_eq!(FALLBACK_STYLE.icon, Icon::PartlySunny);
        assert_eq!(FALLBACK_STYLE.color, "#7b2869");
    }

    #[test]
    fn icon_display_uses_identifier() {
        assert_eq!(Icon::Rain.to_string(), "cloud-rain-fill");
        assert_eq!(Icon::PartlySunny.to_string(), "weather-partly-sunny");
    }
}
