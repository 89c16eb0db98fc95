//! Weather API client for Open-Meteo integration
//!
//! HTTP client functionality for the two provider dependencies: the geocoding
//! API (forward and reverse) and the forecast API. No API key is required.
//! Raw provider payloads stay inside this module; callers consume the shaped
//! models from [`crate::models`].

use crate::config::WeatherConfig;
use crate::error::SkyNowError;
use crate::models::{DailyForecastEntry, HourlyForecastEntry};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Daily summary fields requested from the forecast API
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min";
/// Hourly detail fields requested when hourly data is desired
const HOURLY_FIELDS: &str =
    "temperature_2m,relativehumidity_2m,windspeed_10m,precipitation,weathercode";

/// A single geocoding match: name, country code, coordinates
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingCandidate {
    /// Location name
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
}

/// Weather API client for Open-Meteo
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    /// HTTP client
    client: Client,
    /// Base URL of the forecast API
    forecast_base: String,
    /// Base URL of the geocoding API
    geocoding_base: String,
}

impl WeatherApiClient {
    /// Create a new weather API client with the configured timeout.
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, SkyNowError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("SkyNow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            forecast_base: config.forecast_base_url.trim_end_matches('/').to_string(),
            geocoding_base: config.geocoding_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up geocoding candidates for a free-text place name.
    ///
    /// # Errors
    /// Fails on network or parse errors; an empty candidate list is not an
    /// error at this layer.
    #[instrument(skip(self))]
    pub async fn geocode(&self, name: &str) -> Result<Vec<GeocodingCandidate>, SkyNowError> {
        let url = format!(
            "{}/v1/search?name={}&count=5&language=en&format=json",
            self.geocoding_base,
            urlencoding::encode(name)
        );
        debug!("Geocoding request URL: {}", url);

        let response: open_meteo::GeocodingResponse = self.get_json(&url).await?;
        let candidates = response.results.unwrap_or_default();

        if candidates.is_empty() {
            warn!("No geocoding results for '{}'", name);
        } else {
            info!("Found {} geocoding results for '{}'", candidates.len(), name);
        }

        Ok(candidates)
    }

    /// Look up place candidates for a coordinate pair (reverse geocoding).
    ///
    /// # Errors
    /// Fails on network or parse errors; callers treat any failure here as
    /// non-fatal.
    #[instrument(skip(self))]
    pub async fn reverse_geocode(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<GeocodingCandidate>, SkyNowError> {
        let url = format!(
            "{}/v1/reverse?latitude={latitude}&longitude={longitude}&language=en&format=json",
            self.geocoding_base
        );
        debug!("Reverse geocoding request URL: {}", url);

        let response: open_meteo::GeocodingResponse = self.get_json(&url).await?;
        Ok(response.results.unwrap_or_default())
    }

    /// Fetch the forecast for a coordinate pair: daily summary fields plus,
    /// when requested, hourly detail. The provider is instructed to use the
    /// location's local timezone so day boundaries align with the hourly
    /// windowing.
    ///
    /// # Errors
    /// Fails on network or parse errors.
    #[instrument(skip(self))]
    pub async fn forecast(
        &self,
        latitude: f64,
        longitude: f64,
        include_hourly: bool,
    ) -> Result<ForecastPayload, SkyNowError> {
        let mut url = format!(
            "{}/v1/forecast?latitude={latitude}&longitude={longitude}&timezone=auto&daily={DAILY_FIELDS}",
            self.forecast_base
        );
        if include_hourly {
            url.push_str("&hourly=");
            url.push_str(HOURLY_FIELDS);
        }
        debug!("Forecast request URL: {}", url);

        let response: open_meteo::ForecastResponse = self.get_json(&url).await?;

        let daily = response.daily.map(|block| block.into_entries());
        let hourly = response.hourly.map(|block| block.into_entries());

        if let Some(daily) = &daily {
            info!(
                "Retrieved forecast with {} daily and {} hourly entries",
                daily.len(),
                hourly.as_ref().map_or(0, Vec::len)
            );
        }

        Ok(ForecastPayload { daily, hourly })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SkyNowError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Shaped forecast payload; `daily` is `None` when the provider omitted the
/// daily block
#[derive(Debug, Clone)]
pub struct ForecastPayload {
    pub daily: Option<Vec<DailyForecastEntry>>,
    pub hourly: Option<Vec<HourlyForecastEntry>>,
}

/// Open-Meteo API response structures and conversion into display entries
mod open_meteo {
    use super::GeocodingCandidate;
    use crate::models::{DailyForecastEntry, HourlyForecastEntry};
    use chrono::{NaiveDate, NaiveDateTime};
    use serde::Deserialize;

    /// Geocoding response from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct GeocodingResponse {
        pub results: Option<Vec<GeocodingCandidate>>,
    }

    /// Forecast response from Open-Meteo
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub daily: Option<DailyBlock>,
        pub hourly: Option<HourlyBlock>,
    }

    /// Daily parallel arrays, one value per day
    #[derive(Debug, Deserialize)]
    pub struct DailyBlock {
        pub time: Vec<NaiveDate>,
        #[serde(rename = "weathercode")]
        pub weather_code: Option<Vec<i32>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<f32>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<f32>>,
    }

    /// Hourly parallel arrays, one value per hour across the whole horizon
    #[derive(Debug, Deserialize)]
    pub struct HourlyBlock {
        pub time: Vec<String>,
        #[serde(rename = "temperature_2m")]
        pub temperature: Option<Vec<f32>>,
        #[serde(rename = "relativehumidity_2m")]
        pub humidity: Option<Vec<f32>>,
        #[serde(rename = "windspeed_10m")]
        pub wind_speed: Option<Vec<f32>>,
        pub precipitation: Option<Vec<f32>>,
        #[serde(rename = "weathercode")]
        pub weather_code: Option<Vec<i32>>,
    }

    fn value_at<T: Copy>(values: &Option<Vec<T>>, index: usize, fallback: T) -> T {
        values
            .as_ref()
            .and_then(|v| v.get(index))
            .copied()
            .unwrap_or(fallback)
    }

    impl DailyBlock {
        /// Zip the parallel arrays into per-day entries, in provider order
        pub fn into_entries(self) -> Vec<DailyForecastEntry> {
            self.time
                .iter()
                .enumerate()
                .map(|(i, &date)| DailyForecastEntry {
                    date,
                    weather_code: value_at(&self.weather_code, i, 0),
                    temperature_max: value_at(&self.temperature_max, i, 0.0),
                    temperature_min: value_at(&self.temperature_min, i, 0.0),
                })
                .collect()
        }
    }

    impl HourlyBlock {
        /// Zip the parallel arrays into per-hour entries, in provider order
        pub fn into_entries(self) -> Vec<HourlyForecastEntry> {
            self.time
                .iter()
                .enumerate()
                .map(|(i, time)| HourlyForecastEntry {
                    // Open-Meteo emits local timestamps without seconds
                    timestamp: NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
                        .unwrap_or_default(),
                    weather_code: value_at(&self.weather_code, i, 0),
                    temperature: value_at(&self.temperature, i, 0.0),
                    humidity_percent: value_at(&self.humidity, i, 0.0),
                    wind_speed: value_at(&self.wind_speed, i, 0.0),
                    precipitation: value_at(&self.precipitation, i, 0.0),
                })
                .collect()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_daily_block_zips_parallel_arrays() {
            let block: DailyBlock = serde_json::from_str(
                r#"{
                    "time": ["2023-12-04", "2023-12-05"],
                    "weathercode": [0, 61],
                    "temperature_2m_max": [10.2, 8.4],
                    "temperature_2m_min": [2.1, 3.0]
                }"#,
            )
            .unwrap();

            let entries = block.into_entries();
            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].weather_code, 0);
            assert_eq!(entries[1].weather_code, 61);
            assert_eq!(entries[1].date, NaiveDate::from_ymd_opt(2023, 12, 5).unwrap());
            assert!(entries[0].date < entries[1].date);
        }

        #[test]
        fn test_hourly_block_parses_local_timestamps() {
            let block: HourlyBlock = serde_json::from_str(
                r#"{
                    "time": ["2023-12-04T00:00", "2023-12-04T01:00"],
                    "temperature_2m": [4.2, 3.9],
                    "relativehumidity_2m": [81.0, 83.0],
                    "windspeed_10m": [12.0, 11.5],
                    "precipitation": [0.0, 0.1],
                    "weathercode": [3, 61]
                }"#,
            )
            .unwrap();

            let entries = block.into_entries();
            assert_eq!(entries.len(), 2);
            assert_eq!(
                entries[1].timestamp,
                NaiveDate::from_ymd_opt(2023, 12, 4)
                    .unwrap()
                    .and_hms_opt(1, 0, 0)
                    .unwrap()
            );
            assert_eq!(entries[1].precipitation, 0.1);
        }

        #[test]
        fn test_missing_parallel_array_falls_back_to_defaults() {
            let block: DailyBlock = serde_json::from_str(
                r#"{"time": ["2023-12-04"], "weathercode": [95]}"#,
            )
            .unwrap();

            let entries = block.into_entries();
            assert_eq!(entries[0].weather_code, 95);
            assert_eq!(entries[0].temperature_max, 0.0);
        }
    }
}
