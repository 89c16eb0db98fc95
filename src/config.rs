//! Configuration management for the `SkyNow` application
//!
//! Handles loading configuration from an optional TOML file and environment
//! variables, and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `SkyNow` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SkyNowConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the forecast API
    #[serde(default = "default_forecast_base_url")]
    pub forecast_base_url: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Whether lookups request hourly detail alongside the daily summary
    #[serde(default = "default_include_hourly")]
    pub include_hourly: bool,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_forecast_base_url() -> String {
    "https://api.open-meteo.com".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://geocoding-api.open-meteo.com".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_include_hourly() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_base_url: default_forecast_base_url(),
            geocoding_base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
            include_hourly: default_include_hourly(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SkyNowConfig {
    /// Load configuration from the default file location and environment
    /// variables.
    ///
    /// # Errors
    /// Fails when the file or environment contents cannot be parsed, or when
    /// validation rejects a value.
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path.
    ///
    /// # Errors
    /// Fails when the file or environment contents cannot be parsed, or when
    /// validation rejects a value.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::default_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with SKYNOW_ prefix,
        // e.g. SKYNOW_WEATHER__TIMEOUT_SECONDS=30
        builder = builder.add_source(
            Environment::with_prefix("SKYNOW")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SkyNowConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// The default configuration file path
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("skynow").join("config.toml"))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Fails when a setting is empty or out of range.
    pub fn validate(&self) -> Result<()> {
        if self.weather.forecast_base_url.is_empty() {
            anyhow::bail!("weather.forecast_base_url must not be empty");
        }
        if self.weather.geocoding_base_url.is_empty() {
            anyhow::bail!("weather.geocoding_base_url must not be empty");
        }
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            anyhow::bail!(
                "weather.timeout_seconds must be between 1 and 300, got: {}",
                self.weather.timeout_seconds
            );
        }
        Ok(())
    }
}
