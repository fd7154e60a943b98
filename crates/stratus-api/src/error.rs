//! Boundary error type: one enum the router maps mechanically to a status
//! code and a JSON body.

use serde_json::json;
use stratus_store::StoreError;
use stratus_weather::WeatherError;
use thiserror::Error;

/// Any failure an API operation can report.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status code for this error.
    ///
    /// Caller mistakes are 400, missing things are 404; every provider or
    /// database failure is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Weather(e) => match e {
                WeatherError::InvalidInput(_) => 400,
                WeatherError::NotFound(_) | WeatherError::NoData => 404,
                WeatherError::Auth
                | WeatherError::Timeout
                | WeatherError::Upstream(_)
                | WeatherError::InvalidResponse(_) => 500,
            },
            ApiError::Store(e) => match e {
                StoreError::InvalidInput(_) => 400,
                StoreError::NotFound(_) => 404,
                StoreError::Database(_) => 500,
            },
        }
    }

    /// User-facing message. Upstream and database detail stays in the logs;
    /// the caller only sees what they can act on.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Weather(e) => match e {
                WeatherError::InvalidInput(msg) => msg.clone(),
                WeatherError::NotFound(_) => {
                    "Location not found. Please try a different search term.".into()
                }
                WeatherError::NoData => {
                    "No air quality data available for this location.".into()
                }
                WeatherError::Auth => "Invalid API key. Please check your configuration.".into(),
                WeatherError::Timeout => "Request timed out. Please try again.".into(),
                WeatherError::Upstream(_) | WeatherError::InvalidResponse(_) => {
                    "Error connecting to weather service. Please try again later.".into()
                }
            },
            ApiError::Store(e) => match e {
                StoreError::InvalidInput(msg) => msg.clone(),
                StoreError::NotFound(_) => "Location not found".into(),
                StoreError::Database(_) => "A data operation failed. Please try again.".into(),
            },
        }
    }

    /// The `{"error": …}` JSON body for this error.
    pub fn body(&self) -> serde_json::Value {
        json!({ "error": self.user_message() })
    }
}
