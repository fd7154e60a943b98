//! Weather aggregation for Stratus.
//!
//! Resolves a place name or coordinate pair through OpenWeatherMap
//! geocoding, fetches current conditions and air quality, and merges the
//! two into a single payload. Air quality is supplementary: its failure
//! never fails the aggregate.

pub mod aggregator;
pub mod client;
pub mod resolver;
pub mod types;

pub use aggregator::WeatherService;
pub use client::OwmClient;
pub use resolver::{resolve, LocationQuery};
pub use types::{AggregatedWeather, AirQuality, CurrentConditions, Location, WeatherError};
