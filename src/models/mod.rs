//! Data models for the `SkyNow` application
//!
//! Core domain models organized by concern:
//! - Location: lookup queries and resolved places
//! - Forecast: per-day and per-hour display entries

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{DailyForecastEntry, ForecastResult, HourlyForecastEntry};
pub use location::{LocationQuery, ResolvedLocation};
