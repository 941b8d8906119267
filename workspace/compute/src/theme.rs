use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dashboard colour scheme. Chart text and grid colours follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Axis label and legend colour.
    pub fn fore_color(self) -> &'static str {
        match self {
            Self::Light => "#000000",
            Self::Dark => "#ffffff",
        }
    }

    pub fn grid_color(self) -> &'static str {
        match self {
            Self::Light => "#e0e0e0",
            Self::Dark => "#444444",
        }
    }

    /// Chart background, transparent over the card.
    pub fn background(self) -> &'static str {
        "rgba(0,0,0,0)"
    }

    pub fn mode(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Class set on `<body>` while this theme is active.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-mode"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mode())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_colors() {
        let theme = Theme::default();
        assert_eq!(theme.fore_color(), "#000000");
        assert_eq!(theme.body_class(), None);

        let dark = theme.toggle();
        assert!(dark.is_dark());
        assert_eq!(dark.fore_color(), "#ffffff");
        assert_eq!(dark.body_class(), Some("dark-mode"));
        assert_eq!(dark.toggle(), Theme::Light);
    }

    #[test]
    fn test_parse_round_trips_display() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(Theme::Light.to_string().parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
    }
}
