//! OpenWeatherMap API client.
//!
//! Four operations: forward geocode, reverse geocode, current weather, air
//! pollution. Each is exactly one GET with a fixed timeout; there are no
//! retries. Responses are classified into `WeatherError` kinds at the
//! boundary so callers never see raw transport errors.

use crate::types::{AirQuality, CurrentConditions, Location, WeatherError};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const REVERSE_GEOCODING_PATH: &str = "/geo/1.0/reverse";
const WEATHER_PATH: &str = "/data/2.5/weather";
const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "stratus/0.1";

/// OpenWeatherMap client.
///
/// The credential travels as the `appid` query parameter on every call.
/// `base_url` is injectable so tests can point the client at a local mock.
#[derive(Debug, Clone)]
pub struct OwmClient {
    client: Arc<Client>,
    base_url: Url,
    api_key: String,
}

impl OwmClient {
    /// Create a client for the given credential and provider root.
    ///
    /// # Errors
    /// Returns `WeatherError::Upstream` if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WeatherError::Upstream(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Forward geocode a place name to up to `limit` candidate locations,
    /// in provider order.
    ///
    /// # Errors
    /// `NotFound` when the provider returns zero candidates.
    pub async fn geocode(&self, name: &str, limit: u8) -> Result<Vec<Location>, WeatherError> {
        tracing::debug!(city = name, limit, "Fetching location candidates");

        let locations: Vec<Location> = self
            .get_json(
                GEOCODING_PATH,
                &[("q", name.to_string()), ("limit", limit.to_string())],
            )
            .await?;

        if locations.is_empty() {
            tracing::info!(city = name, "No locations found");
            return Err(WeatherError::NotFound(name.to_string()));
        }

        tracing::info!("Found {} locations for {}", locations.len(), name);
        Ok(locations)
    }

    /// Reverse geocode a coordinate pair to its nearest named place.
    ///
    /// The returned location carries the caller's coordinates verbatim, not
    /// the centroid the provider reports.
    ///
    /// # Errors
    /// `NotFound` when the provider has no place for the coordinates.
    pub async fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Location, WeatherError> {
        tracing::debug!(lat, lon, "Reverse geocoding coordinates");

        let mut locations: Vec<Location> = self
            .get_json(
                REVERSE_GEOCODING_PATH,
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        let first = locations
            .drain(..)
            .next()
            .ok_or_else(|| WeatherError::NotFound(format!("({lat}, {lon})")))?;

        Ok(Location { lat, lon, ..first })
    }

    /// Fetch current conditions for a coordinate pair, metric units.
    pub async fn current_weather(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        tracing::debug!(lat, lon, "Fetching current weather");

        self.get_json(
            WEATHER_PATH,
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", "metric".to_string()),
            ],
        )
        .await
    }

    /// Fetch the air quality reading for a coordinate pair.
    ///
    /// # Errors
    /// `NoData` when the provider responds 2xx with an empty reading list.
    pub async fn air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality, WeatherError> {
        tracing::debug!(lat, lon, "Fetching air quality");

        let body: AirPollutionResponse = self
            .get_json(
                AIR_POLLUTION_PATH,
                &[("lat", lat.to_string()), ("lon", lon.to_string())],
            )
            .await?;

        let entry = body.list.into_iter().next().ok_or(WeatherError::NoData)?;
        Ok(AirQuality::new(entry.main.aqi, entry.components))
    }

    /// One GET against `path`, classified per the error taxonomy.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, WeatherError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| WeatherError::Upstream(e.to_string()))?;

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::error!(%status, path, "Provider rejected the API key");
            return Err(WeatherError::Auth);
        }
        if !status.is_success() {
            tracing::error!(%status, path, "Provider returned an error status");
            return Err(WeatherError::Upstream(format!("status {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))
    }
}

fn classify_transport(e: reqwest::Error) -> WeatherError {
    if e.is_timeout() {
        WeatherError::Timeout
    } else {
        WeatherError::Upstream(e.to_string())
    }
}

/// Wire shape of the air pollution endpoint.
#[derive(Debug, Deserialize)]
struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: AirPollutionMain,
    #[serde(default)]
    components: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionMain {
    aqi: u8,
}
