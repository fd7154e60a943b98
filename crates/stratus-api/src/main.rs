use anyhow::{Context, Result};
use stratus_api::Api;
use stratus_store::{ChallengeStore, LocationStore};
use stratus_weather::{OwmClient, WeatherService};

#[tokio::main]
async fn main() -> Result<()> {
    stratus_core::init()?;

    let config = stratus_core::Config::from_env().context("Failed to load configuration")?;

    let client = OwmClient::new(&config.api_key, config.base_url.clone())
        .context("Failed to create weather client")?;

    // First open creates the database and seeds the challenge catalog.
    let locations = LocationStore::open(&config.database_path)
        .context("Failed to open saved-location store")?;
    let challenges = ChallengeStore::open(&config.database_path)
        .context("Failed to open challenge store")?;

    let api = Api::new(WeatherService::new(client), locations, challenges);
    let tracks = api.challenges()?.tracks.len();

    tracing::info!(
        db = %config.database_path.display(),
        provider = %config.base_url,
        tracks,
        "Stratus service ready"
    );

    Ok(())
}
