//! `SkyNow` - Weather lookup for a place name or device position
//!
//! This library provides the forecast resolution pipeline: geocoding a
//! free-text place name (or reverse-geocoding a coordinate pair), fetching a
//! multi-day forecast from Open-Meteo, and shaping the raw parallel-array
//! payload into a typed per-day, per-hour display model.

pub mod api;
pub mod conditions;
pub mod config;
pub mod error;
pub mod format;
pub mod geolocation;
pub mod models;
pub mod notify;
pub mod pipeline;

// Re-export core types for public API
pub use api::{GeocodingCandidate, WeatherApiClient};
pub use conditions::IconCategory;
pub use config::SkyNowConfig;
pub use error::SkyNowError;
pub use geolocation::{GeolocationError, GeolocationProvider, Position};
pub use models::{
    DailyForecastEntry, ForecastResult, HourlyForecastEntry, LocationQuery, ResolvedLocation,
};
pub use notify::{Notifier, Severity};
pub use pipeline::{ForecastPipeline, LookupGuard, LookupState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, SkyNowError>;
