//! Location models: lookup queries and resolved places

use crate::error::SkyNowError;
use crate::format::country_flag;
use serde::{Deserialize, Serialize};

/// A user-supplied lookup: a free-text place name or a coordinate pair
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name (city, region, etc.)
    Name(String),
    /// Geographic coordinates in decimal degrees
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationQuery {
    /// Create a name query.
    ///
    /// # Errors
    /// Returns a validation error for empty or whitespace-only text.
    pub fn name(text: &str) -> Result<Self, SkyNowError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SkyNowError::validation("Location cannot be empty"));
        }
        Ok(Self::Name(trimmed.to_string()))
    }

    /// Create a coordinate query.
    ///
    /// # Errors
    /// Returns a validation error for coordinates outside the valid ranges.
    pub fn coordinates(latitude: f64, longitude: f64) -> Result<Self, SkyNowError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SkyNowError::validation(format!(
                "Latitude must be between -90 and 90, got: {latitude}"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SkyNowError::validation(format!(
                "Longitude must be between -180 and 180, got: {longitude}"
            )));
        }
        Ok(Self::Coordinates {
            latitude,
            longitude,
        })
    }

    /// Parse user input: "lat,lon" (or "lat lon") becomes a coordinate query,
    /// anything else a name query.
    ///
    /// # Errors
    /// Returns a validation error for empty input.
    pub fn parse(input: &str) -> Result<Self, SkyNowError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SkyNowError::validation("Location cannot be empty"));
        }

        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() == 2 {
            if let (Ok(lat), Ok(lon)) = (parts[0].parse::<f64>(), parts[1].parse::<f64>()) {
                if let Ok(query) = Self::coordinates(lat, lon) {
                    return Ok(query);
                }
            }
        }

        Self::name(input)
    }
}

/// A place produced by geocoding; immutable once created and replaced wholesale
/// on the next lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedLocation {
    /// Display name, place name plus country flag when available
    pub display_name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl ResolvedLocation {
    /// Build a resolved location from a geocoding match, appending the country
    /// flag to the display name when the country code encodes cleanly.
    #[must_use]
    pub fn from_match(
        name: &str,
        country_code: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let display_name = match country_code.as_deref().map(country_flag) {
            Some(Ok(flag)) => format!("{name} {flag}"),
            _ => name.to_string(),
        };
        Self {
            display_name,
            country_code,
            latitude,
            longitude,
        }
    }

    /// Placeholder location for a device position that could not be
    /// reverse-geocoded
    #[must_use]
    pub fn current_location(latitude: f64, longitude: f64) -> Self {
        Self {
            display_name: "Current Location".to_string(),
            country_code: None,
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
