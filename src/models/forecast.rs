//! Forecast display models and hourly windowing

use super::ResolvedLocation;
use crate::conditions::IconCategory;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Number of hourly entries per forecast day, in provider order
pub const HOURS_PER_DAY: usize = 24;

/// One forecast day, ordered ascending by date; the first entry is today
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyForecastEntry {
    /// Calendar date in the location's local timezone
    pub date: NaiveDate,
    /// WMO condition code
    pub weather_code: i32,
    /// Maximum temperature in Celsius
    pub temperature_max: f32,
    /// Minimum temperature in Celsius
    pub temperature_min: f32,
}

impl DailyForecastEntry {
    /// Icon category for this day's condition code
    #[must_use]
    pub fn icon(&self) -> IconCategory {
        IconCategory::from_wmo_code(self.weather_code)
    }
}

/// One forecast hour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourlyForecastEntry {
    /// Timestamp in the location's local timezone
    pub timestamp: NaiveDateTime,
    /// WMO condition code
    pub weather_code: i32,
    /// Temperature in Celsius
    pub temperature: f32,
    /// Relative humidity percentage (0-100)
    pub humidity_percent: f32,
    /// Wind speed in km/h
    pub wind_speed: f32,
    /// Precipitation amount in mm
    pub precipitation: f32,
}

impl HourlyForecastEntry {
    /// Icon category for this hour's condition code
    #[must_use]
    pub fn icon(&self) -> IconCategory {
        IconCategory::from_wmo_code(self.weather_code)
    }
}

/// A complete resolved lookup: location plus shaped forecast data.
///
/// Created fresh per lookup and fully replaces any prior result; results are
/// never merged across lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastResult {
    /// The geocoded location this forecast belongs to
    pub location: ResolvedLocation,
    /// Per-day summary entries, ordered by date ascending
    pub daily: Vec<DailyForecastEntry>,
    /// Per-hour detail across the whole horizon, when requested
    pub hourly: Option<Vec<HourlyForecastEntry>>,
}

impl ForecastResult {
    /// The 24-hour window for a given day index.
    ///
    /// Hourly data arrives aligned and contiguous starting at day 0 local
    /// midnight (the forecast is requested with `timezone=auto`), so the
    /// window for day `i` is the fixed slice `[24*i, 24*(i+1))`. Returns
    /// `None` when hourly data was not requested or the window falls past the
    /// end of the hourly horizon (trailing/partial days degrade gracefully).
    #[must_use]
    pub fn hourly_for_day(&self, day_index: usize) -> Option<&[HourlyForecastEntry]> {
        let hourly = self.hourly.as_deref()?;
        let start = day_index.checked_mul(HOURS_PER_DAY)?;
        let end = start.checked_add(HOURS_PER_DAY)?;
        hourly.get(start..end)
    }
}
