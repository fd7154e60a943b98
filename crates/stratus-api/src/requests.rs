//! Request and response bodies for the HTTP surface.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stratus_store::ChallengeStatus;

/// Body of `POST /weather`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherRequest {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Body of `POST /locations/save`.
///
/// `name`, `lat` and `lon` default to their empty values when absent; the
/// store rejects those as invalid input, which keeps "field missing" and
/// "field empty" on the same 400 path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveLocationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

/// Body of `POST /progress/update`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdateRequest {
    pub challenge_id: Option<i64>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub score: i64,
}

/// Body of `GET /challenges`.
#[derive(Debug, Serialize)]
pub struct ChallengesResponse {
    pub status: &'static str,
    pub tracks: BTreeMap<String, Vec<ChallengeStatus>>,
}
