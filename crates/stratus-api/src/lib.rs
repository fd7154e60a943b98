//! Service facade for Stratus.
//!
//! Exposes one typed operation per route of the HTTP surface, plus the
//! error-to-status mapping a router needs to turn results into responses.
//! The HTTP server itself lives outside this workspace.

pub mod error;
pub mod handlers;
pub mod requests;

pub use error::ApiError;
pub use handlers::Api;
pub use requests::{
    ChallengesResponse, ProgressUpdateRequest, SaveLocationRequest, WeatherRequest,
};
