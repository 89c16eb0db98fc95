//! Forecast resolution pipeline
//!
//! Orchestrates a lookup end to end: location resolution (geocoding a place
//! name, or reverse-geocoding a device position), then the forecast fetch,
//! then shaping into a [`ForecastResult`]. The two network calls are strictly
//! sequential because the forecast request needs the resolved coordinates.
//!
//! The pipeline is reentrant. Each lookup is tagged with a generation from
//! [`LookupState`]; a slower response from a superseded lookup is discarded
//! instead of clobbering a newer result, and the in-progress flag is cleared
//! by guard drop on every path.

use crate::api::WeatherApiClient;
use crate::config::SkyNowConfig;
use crate::error::SkyNowError;
use crate::geolocation::GeolocationProvider;
use crate::models::{ForecastResult, LocationQuery, ResolvedLocation, forecast::HOURS_PER_DAY};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, instrument, warn};

/// Explicit lookup state container: generation counter, in-progress flag, and
/// the single current-result slot
#[derive(Debug, Default)]
pub struct LookupState {
    generation: AtomicU64,
    loading: AtomicBool,
    current: Mutex<Option<ForecastResult>>,
}

impl LookupState {
    /// Start a new lookup generation and set the in-progress flag. Any lookup
    /// begun earlier is superseded from this point on.
    pub fn begin(&self) -> LookupGuard<'_> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.loading.store(true, Ordering::SeqCst);
        LookupGuard {
            state: self,
            generation,
        }
    }

    /// Whether a lookup is currently in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// The most recently committed result, if any
    ///
    /// # Panics
    /// Panics if the result slot mutex is poisoned.
    #[must_use]
    pub fn current(&self) -> Option<ForecastResult> {
        self.current.lock().unwrap().clone()
    }
}

/// Guard for one in-flight lookup.
///
/// Committing through a superseded guard is a no-op, and dropping the guard
/// clears the in-progress flag for the current generation whether the lookup
/// succeeded or failed.
#[derive(Debug)]
pub struct LookupGuard<'a> {
    state: &'a LookupState,
    generation: u64,
}

impl LookupGuard<'_> {
    /// Whether this lookup is still the newest one
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.state.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Store the result in the current slot unless a newer lookup has begun.
    /// Returns whether the result was accepted.
    ///
    /// # Panics
    /// Panics if the result slot mutex is poisoned.
    pub fn commit(&self, result: ForecastResult) -> bool {
        let mut slot = self.state.current.lock().unwrap();
        if self.is_current() {
            *slot = Some(result);
            true
        } else {
            debug!(
                "Discarding stale result from superseded lookup generation {}",
                self.generation
            );
            false
        }
    }
}

impl Drop for LookupGuard<'_> {
    fn drop(&mut self) {
        // A stale guard must not clear the flag for the lookup that replaced it
        if self.is_current() {
            self.state.loading.store(false, Ordering::SeqCst);
        }
    }
}

/// Forecast resolution pipeline over the Open-Meteo APIs
#[derive(Debug)]
pub struct ForecastPipeline {
    client: WeatherApiClient,
    include_hourly: bool,
    state: LookupState,
}

impl ForecastPipeline {
    /// Create a pipeline from application configuration.
    ///
    /// # Errors
    /// Fails when the HTTP client cannot be constructed.
    pub fn new(config: &SkyNowConfig) -> Result<Self, SkyNowError> {
        Ok(Self {
            client: WeatherApiClient::new(&config.weather)?,
            include_hourly: config.weather.include_hourly,
            state: LookupState::default(),
        })
    }

    /// The pipeline's lookup state (loading flag, current result)
    #[must_use]
    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Resolve a forecast for a free-text place name.
    ///
    /// Empty or whitespace-only text is rejected before any network call. The
    /// first geocoding candidate is taken as canonical; the provider's own
    /// relevance ranking is trusted.
    ///
    /// # Errors
    /// `Validation` for blank text, `LocationNotFound` for zero candidates,
    /// `ForecastUnavailable` for a response without a daily block, and
    /// `Transport` for network or parse failures.
    #[instrument(skip(self))]
    pub async fn resolve_by_name(&self, text: &str) -> Result<ForecastResult, SkyNowError> {
        let name = text.trim();
        if name.is_empty() {
            return Err(SkyNowError::validation("Location cannot be empty"));
        }

        let guard = self.state.begin();
        let result = self.resolve_name_inner(name).await;
        Self::settle(&guard, result)
    }

    /// Resolve a forecast for a coordinate pair.
    ///
    /// Reverse geocoding is attempted for the display name, but its failure
    /// is non-fatal: the name falls back to a fixed placeholder. A forecast
    /// failure remains fatal.
    ///
    /// # Errors
    /// `Validation` for out-of-range coordinates, `ForecastUnavailable` for a
    /// response without a daily block, and `Transport` for forecast network
    /// or parse failures.
    #[instrument(skip(self))]
    pub async fn resolve_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResult, SkyNowError> {
        LocationQuery::coordinates(latitude, longitude)?;

        let guard = self.state.begin();
        let result = self.resolve_coordinates_inner(latitude, longitude).await;
        Self::settle(&guard, result)
    }

    /// Resolve a forecast for the current device position.
    ///
    /// # Errors
    /// `GeolocationDenied`/`GeolocationUnsupported` for capability failures,
    /// then as [`Self::resolve_by_coordinates`].
    pub async fn resolve_current_position(
        &self,
        provider: &dyn GeolocationProvider,
    ) -> Result<ForecastResult, SkyNowError> {
        let position = provider.current_position().await?;
        info!(
            "Device position acquired: {:.4}, {:.4}",
            position.latitude, position.longitude
        );
        self.resolve_by_coordinates(position.latitude, position.longitude)
            .await
    }

    async fn resolve_name_inner(&self, name: &str) -> Result<ForecastResult, SkyNowError> {
        let candidates = self.client.geocode(name).await?;
        let Some(candidate) = candidates.into_iter().next() else {
            return Err(SkyNowError::location_not_found(name));
        };

        let location = ResolvedLocation::from_match(
            &candidate.name,
            candidate.country_code,
            candidate.latitude,
            candidate.longitude,
        );
        info!(
            "Resolved '{}' to {} ({})",
            name,
            location.display_name,
            location.format_coordinates()
        );

        self.fetch_forecast(location).await
    }

    async fn resolve_coordinates_inner(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastResult, SkyNowError> {
        let location = match self.client.reverse_geocode(latitude, longitude).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(candidate) => ResolvedLocation::from_match(
                    &candidate.name,
                    candidate.country_code,
                    latitude,
                    longitude,
                ),
                None => {
                    debug!("No reverse geocoding match, using placeholder name");
                    ResolvedLocation::current_location(latitude, longitude)
                }
            },
            Err(e) => {
                warn!("Reverse geocoding failed: {}, using placeholder name", e);
                ResolvedLocation::current_location(latitude, longitude)
            }
        };

        self.fetch_forecast(location).await
    }

    async fn fetch_forecast(
        &self,
        location: ResolvedLocation,
    ) -> Result<ForecastResult, SkyNowError> {
        let payload = self
            .client
            .forecast(location.latitude, location.longitude, self.include_hourly)
            .await?;

        let Some(daily) = payload.daily else {
            return Err(SkyNowError::ForecastUnavailable {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        };

        if let Some(hourly) = &payload.hourly {
            if hourly.len() != daily.len() * HOURS_PER_DAY {
                // Trailing days without a full window degrade to "no hourly data"
                warn!(
                    "Hourly horizon ({}) does not cover {} daily entries",
                    hourly.len(),
                    daily.len()
                );
            }
        }

        Ok(ForecastResult {
            location,
            daily,
            hourly: payload.hourly,
        })
    }

    fn settle(
        guard: &LookupGuard<'_>,
        result: Result<ForecastResult, SkyNowError>,
    ) -> Result<ForecastResult, SkyNowError> {
        if let Ok(forecast) = &result {
            guard.commit(forecast.clone());
        }
        result
    }
}
