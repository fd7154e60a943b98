//! Location resolution: free-text city name or coordinate pair in,
//! ordered location candidates out.

use crate::client::OwmClient;
use crate::types::{Location, WeatherError};
use serde::Deserialize;

/// How many candidates a forward geocode asks for.
const FORWARD_GEOCODE_LIMIT: u8 = 5;

/// An inbound location query. At least a city name or a full coordinate
/// pair must be present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self {
            city: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn coordinates(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(lat),
            lon: Some(lon),
            ..Self::default()
        }
    }
}

/// Resolve a query to one or more locations.
///
/// A full coordinate pair wins over a city name; the reverse-geocoded place
/// is returned as a one-element list. Otherwise the city name is forward
/// geocoded and all candidates are returned in provider order. The first
/// element is the canonical resolution used downstream.
///
/// # Errors
/// `InvalidInput` when neither a city name nor both coordinates are given
/// (no upstream call is made); `NotFound` when nothing matches.
pub async fn resolve(
    client: &OwmClient,
    query: &LocationQuery,
) -> Result<Vec<Location>, WeatherError> {
    if let (Some(lat), Some(lon)) = (query.lat, query.lon) {
        let location = client.reverse_geocode(lat, lon).await?;
        return Ok(vec![location]);
    }

    let city = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            WeatherError::InvalidInput("Please provide either a city name or coordinates".into())
        })?;

    client.geocode(city, FORWARD_GEOCODE_LIMIT).await
}
