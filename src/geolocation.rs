//! Device position acquisition
//!
//! Geolocation is a host capability, not a network dependency: a one-shot
//! position request that yields coordinates or a failure-with-reason. The
//! trait lets front ends plug in whatever the host offers and keeps capability
//! failures distinct from network failures.

use async_trait::async_trait;
use thiserror::Error;

/// A device position fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the host reports it
    pub accuracy_meters: Option<f64>,
}

/// Geolocation capability errors
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// One-shot device position acquisition
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Request the current device position once.
    ///
    /// # Errors
    /// Fails with the reason the host could not produce a position.
    async fn current_position(&self) -> Result<Position, GeolocationError>;
}

/// Provider for hosts without a geolocation capability
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_geolocation_reports_unsupported() {
        let provider = NoGeolocation;
        assert!(matches!(
            provider.current_position().await,
            Err(GeolocationError::Unsupported)
        ));
    }
}
