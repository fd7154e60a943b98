//! The aggregation workflow: resolve, fetch, merge.

use crate::client::OwmClient;
use crate::resolver::{resolve, LocationQuery};
use crate::types::{AggregatedWeather, WeatherError};

/// Orchestrates resolution, current weather and air quality into one
/// response payload.
///
/// Weather is the primary deliverable: any failure fetching it fails the
/// whole operation. Air quality is supplementary: its failure is logged and
/// the field is set to null.
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: OwmClient,
}

impl WeatherService {
    pub fn new(client: OwmClient) -> Self {
        Self { client }
    }

    /// Resolve the query and fetch the combined weather payload.
    ///
    /// # Errors
    /// Propagates resolver errors (`InvalidInput`, `NotFound`) and any
    /// current-weather failure. Air-quality failures never surface.
    pub async fn get_weather(
        &self,
        query: &LocationQuery,
    ) -> Result<AggregatedWeather, WeatherError> {
        let locations = resolve(&self.client, query).await?;

        // resolve() never returns an empty list.
        let first = locations
            .first()
            .ok_or_else(|| WeatherError::NotFound("no location candidates".into()))?;
        let (lat, lon) = (first.lat, first.lon);

        // Both fetches depend only on the resolved coordinates, so they can
        // run concurrently without changing observable behavior.
        let (weather, air) = tokio::join!(
            self.client.current_weather(lat, lon),
            self.client.air_quality(lat, lon),
        );

        let conditions = weather?;
        let air_quality = match air {
            Ok(reading) => Some(reading),
            Err(WeatherError::NoData) => {
                tracing::debug!(lat, lon, "No air quality data for location");
                None
            }
            Err(e) => {
                tracing::warn!(lat, lon, "Air quality fetch failed: {e}");
                None
            }
        };

        tracing::info!(lat, lon, "Aggregated weather request complete");
        Ok(AggregatedWeather {
            conditions,
            air_quality,
            location_details: locations,
        })
    }
}
