use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A geocoded place.
///
/// Produced by forward or reverse geocoding; immutable once returned and
/// never persisted unless the caller explicitly saves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub local_names: HashMap<String, String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// One entry of the provider's `weather` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub id: i64,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperature/pressure/humidity block of a current-conditions reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deg: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clouds {
    pub all: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// Sunrise/sunset block; times are unix seconds, as the provider sends them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SysInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<i64>,
}

/// Current conditions for one coordinate pair, metric units.
///
/// Typed passthrough of the provider's current-weather payload. `coord`,
/// `weather` and `main` are required; a 2xx body missing them is treated as
/// an invalid response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub coord: Coord,
    pub weather: Vec<ConditionSummary>,
    pub main: MainReadings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clouds: Option<Clouds>,
    pub dt: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys: Option<SysInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Air quality reading on the provider's 1..5 AQI scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u8,
    pub aqi_label: String,
    pub components: HashMap<String, f64>,
}

impl AirQuality {
    pub fn new(aqi: u8, components: HashMap<String, f64>) -> Self {
        Self {
            aqi,
            aqi_label: aqi_label(aqi).to_string(),
            components,
        }
    }
}

/// Human-readable label for an AQI value.
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

/// Combined weather response: current conditions plus air quality and the
/// full list of location candidates the query resolved to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedWeather {
    #[serde(flatten)]
    pub conditions: CurrentConditions,
    pub air_quality: Option<AirQuality>,
    pub location_details: Vec<Location>,
}

/// Weather subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// Caller-supplied fields were missing or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The query resolved to no location.
    #[error("Location not found: {0}")]
    NotFound(String),

    /// The provider has no air quality reading for the coordinates.
    #[error("No air quality data available for this location")]
    NoData,

    /// The provider rejected the credential (HTTP 401).
    #[error("Invalid credentials")]
    Auth,

    /// The request hit the fixed timeout.
    #[error("Request timed out")]
    Timeout,

    /// Transport failure or an unexpected provider status.
    #[error("Weather service unavailable: {0}")]
    Upstream(String),

    /// 2xx response whose body did not decode to the expected shape.
    #[error("Invalid response from weather service: {0}")]
    InvalidResponse(String),
}
