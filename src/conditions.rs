//! WMO weather condition code classification
//!
//! Maps the numeric condition codes returned by Open-Meteo (WMO code table)
//! to display icon categories. Lookup is exact set-membership over the codes
//! the provider actually emits; anything else classifies as [`IconCategory::Unknown`]
//! so a missing code is visible instead of masquerading as clear weather.

use serde::{Deserialize, Serialize};

/// Display icon category for a WMO weather condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    Clear,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    SevereThunderstorm,
    /// Sentinel for codes outside the table; renders distinctly
    Unknown,
}

impl IconCategory {
    /// Classify a WMO condition code by exact set membership.
    /// See: <https://open-meteo.com/en/docs#weathervariables>
    #[must_use]
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::MostlyClear,
            2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 56 | 61 | 66 | 80 => Self::Drizzle,
            53 | 55 | 57 | 63 | 65 | 67 | 81 | 82 => Self::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 => Self::Thunderstorm,
            96 | 99 => Self::SevereThunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Display glyph for this category
    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::MostlyClear => "🌤",
            Self::PartlyCloudy => "⛅️",
            Self::Overcast => "☁️",
            Self::Fog => "🌫",
            Self::Drizzle => "🌦",
            Self::Rain => "🌧",
            Self::Snow => "🌨",
            Self::Thunderstorm => "🌩",
            Self::SevereThunderstorm => "⛈",
            Self::Unknown => "❓",
        }
    }

    /// Human-readable description of this category
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear sky",
            Self::MostlyClear => "Mainly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::SevereThunderstorm => "Thunderstorm with hail",
            Self::Unknown => "Unknown",
        }
    }
}
