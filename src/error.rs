//! Error types and handling for the `SkyNow` application

use crate::geolocation::GeolocationError;
use thiserror::Error;

/// Main error type for the `SkyNow` application
#[derive(Error, Debug)]
pub enum SkyNowError {
    /// Input validation errors, rejected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Geocoding returned no candidates for the query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// Forecast response is missing the expected daily block
    #[error("Forecast unavailable for {latitude:.4}, {longitude:.4}")]
    ForecastUnavailable { latitude: f64, longitude: f64 },

    /// The host denied access to the device position
    #[error("Location permission denied")]
    GeolocationDenied,

    /// The host has no geolocation capability
    #[error("Geolocation is not supported on this device")]
    GeolocationUnsupported,

    /// Network or parse failure of an outbound request
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
}

impl SkyNowError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new location-not-found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Get a user-friendly error message, suitable for a transient notification
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SkyNowError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            SkyNowError::LocationNotFound { query } => {
                format!("Location not found: {query}")
            }
            SkyNowError::ForecastUnavailable { .. } => {
                "Weather information could not be obtained for this location.".to_string()
            }
            SkyNowError::GeolocationDenied => "Location permission denied.".to_string(),
            SkyNowError::GeolocationUnsupported => {
                "This device does not support the location feature.".to_string()
            }
            SkyNowError::Transport { .. } => {
                "Unable to reach the weather service. Please check your internet connection."
                    .to_string()
            }
        }
    }
}

impl From<GeolocationError> for SkyNowError {
    fn from(err: GeolocationError) -> Self {
        match err {
            GeolocationError::PermissionDenied => SkyNowError::GeolocationDenied,
            GeolocationError::Unsupported => SkyNowError::GeolocationUnsupported,
            GeolocationError::Timeout | GeolocationError::Other(_) => {
                SkyNowError::GeolocationDenied
            }
        }
    }
}
