//! Operation handlers, one per route.
//!
//! Stores sit behind a mutex so each operation runs with exclusive store
//! access; in particular the clear-then-set `is_current` transaction is
//! serialized against concurrent saves.

use parking_lot::Mutex;
use stratus_store::{ChallengeStore, LocationStore, NewLocation, SaveOutcome, SavedLocation, StoreError};
use stratus_weather::{AggregatedWeather, LocationQuery, WeatherService};

use crate::error::ApiError;
use crate::requests::{
    ChallengesResponse, ProgressUpdateRequest, SaveLocationRequest, WeatherRequest,
};

/// The service facade: weather aggregation plus the two persistence paths.
pub struct Api {
    weather: WeatherService,
    locations: Mutex<LocationStore>,
    challenges: Mutex<ChallengeStore>,
}

impl Api {
    pub fn new(
        weather: WeatherService,
        locations: LocationStore,
        challenges: ChallengeStore,
    ) -> Self {
        Self {
            weather,
            locations: Mutex::new(locations),
            challenges: Mutex::new(challenges),
        }
    }

    /// `POST /weather` — resolve the query and return the merged payload.
    ///
    /// # Errors
    /// `InvalidInput` (400) when neither city nor coordinates are given,
    /// `NotFound` (404) when the query resolves to nothing, upstream
    /// failures as 500.
    pub async fn weather(&self, req: WeatherRequest) -> Result<AggregatedWeather, ApiError> {
        tracing::debug!(city = req.city.as_deref(), "Weather request received");
        let query = LocationQuery {
            city: req.city,
            lat: req.lat,
            lon: req.lon,
        };
        let payload = self.weather.get_weather(&query).await?;
        Ok(payload)
    }

    /// `POST /locations/save` — upsert a saved location. Success is 201.
    pub fn save_location(&self, req: SaveLocationRequest) -> Result<SaveOutcome, ApiError> {
        let loc = NewLocation {
            name: req.name,
            lat: req.lat,
            lon: req.lon,
            country: req.country,
            state: req.state,
            is_current: req.is_current,
        };
        let outcome = self.locations.lock().save(&loc)?;
        tracing::info!("{}", outcome.message());
        Ok(outcome)
    }

    /// `GET /locations/saved` — current location first, then newest.
    pub fn saved_locations(&self) -> Result<Vec<SavedLocation>, ApiError> {
        let locations = self.locations.lock().list()?;
        tracing::debug!("Found {} saved locations", locations.len());
        Ok(locations)
    }

    /// `DELETE /locations/delete/{id}`.
    pub fn delete_location(&self, id: i64) -> Result<(), ApiError> {
        self.locations.lock().delete(id)?;
        Ok(())
    }

    /// `GET /challenges` — catalog grouped by track, joined with progress.
    pub fn challenges(&self) -> Result<ChallengesResponse, ApiError> {
        let tracks = self.challenges.lock().list_by_track()?;
        Ok(ChallengesResponse {
            status: "success",
            tracks,
        })
    }

    /// `POST /progress/update` — upsert one progress record.
    ///
    /// # Errors
    /// `InvalidInput` (400) when `challenge_id` is absent.
    pub fn update_progress(&self, req: ProgressUpdateRequest) -> Result<(), ApiError> {
        let challenge_id = req
            .challenge_id
            .ok_or_else(|| StoreError::invalid_input("challenge_id is required"))?;
        self.challenges
            .lock()
            .update_progress(challenge_id, req.completed, req.score)?;
        Ok(())
    }
}
