//! End-to-end facade tests: operations against a mock provider and a
//! scratch database, asserting the status codes a router would emit.

use serde_json::json;
use stratus_api::{Api, ProgressUpdateRequest, SaveLocationRequest, WeatherRequest};
use stratus_store::{ChallengeStore, LocationStore, SaveOutcome};
use stratus_weather::{OwmClient, WeatherService};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, dir: &tempfile::TempDir) -> Api {
    let base = Url::parse(&server.uri()).unwrap();
    let client = OwmClient::new("test-key", base).unwrap();
    let db = dir.path().join("stratus.db");
    Api::new(
        WeatherService::new(client),
        LocationStore::open(&db).unwrap(),
        ChallengeStore::open(&db).unwrap(),
    )
}

async fn mount_paris(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Paris", "lat": 48.8589, "lon": 2.32, "country": "FR"}
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": {"lat": 48.8589, "lon": 2.32},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {
                "temp": 12.0, "feels_like": 11.2, "temp_min": 10.0,
                "temp_max": 13.5, "pressure": 1009, "humidity": 82
            },
            "dt": 1735000000,
            "name": "Paris"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{"main": {"aqi": 3}, "components": {"pm2_5": 9.4}}]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_weather_request_for_city() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    mount_paris(&server).await;
    let api = api_for(&server, &dir);

    let payload = api
        .weather(WeatherRequest {
            city: Some("Paris".into()),
            ..WeatherRequest::default()
        })
        .await
        .unwrap();

    assert_eq!(payload.location_details[0].name, "Paris");
    let air = payload.air_quality.unwrap();
    assert!((1..=5).contains(&air.aqi));
    assert_eq!(air.aqi_label, "Moderate");
}

#[tokio::test]
async fn test_weather_without_city_or_coordinates_is_400() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&server, &dir);

    let err = api.weather(WeatherRequest::default()).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(
        err.body(),
        json!({"error": "Please provide either a city name or coordinates"})
    );
    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "invalid input must not reach the provider"
    );
}

#[tokio::test]
async fn test_weather_upstream_failures_are_500() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let api = api_for(&server, &dir);

    let err = api
        .weather(WeatherRequest {
            city: Some("Paris".into()),
            ..WeatherRequest::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 500);
}

#[tokio::test]
async fn test_unresolvable_city_is_404() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    Mock::given(method("GET"))
        .and(path("/geo/1.0/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let api = api_for(&server, &dir);

    let err = api
        .weather(WeatherRequest {
            city: Some("Atlantis".into()),
            ..WeatherRequest::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_location_save_list_delete_cycle() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&server, &dir);

    let outcome = api
        .save_location(SaveLocationRequest {
            name: "Paris".into(),
            lat: 48.8589,
            lon: 2.32,
            country: Some("FR".into()),
            is_current: true,
            ..SaveLocationRequest::default()
        })
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Created);

    // Same identity again: update, not a second row.
    let outcome = api
        .save_location(SaveLocationRequest {
            name: "Paris".into(),
            lat: 48.8589,
            lon: 2.32,
            state: Some("Ile-de-France".into()),
            ..SaveLocationRequest::default()
        })
        .unwrap();
    assert_eq!(outcome, SaveOutcome::Updated);

    let listed = api.saved_locations().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].state.as_deref(), Some("Ile-de-France"));

    api.delete_location(listed[0].id).unwrap();
    let err = api.delete_location(listed[0].id).unwrap_err();
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_save_with_missing_fields_is_400() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&server, &dir);

    // Body `{"name": "Oslo"}`: coordinates default to zero, which means
    // absent.
    let err = api
        .save_location(SaveLocationRequest {
            name: "Oslo".into(),
            ..SaveLocationRequest::default()
        })
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_progress_update_then_challenges() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&server, &dir);

    api.update_progress(ProgressUpdateRequest {
        challenge_id: Some(3),
        completed: true,
        score: 300,
    })
    .unwrap();

    let response = api.challenges().unwrap();
    assert_eq!(response.status, "success");

    let status = response
        .tracks
        .values()
        .flatten()
        .find(|c| c.challenge.id == 3)
        .unwrap();
    assert!(status.completed);
    assert_eq!(status.score, 300);
}

#[tokio::test]
async fn test_progress_update_without_id_is_400() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let api = api_for(&server, &dir);

    let err = api
        .update_progress(ProgressUpdateRequest::default())
        .unwrap_err();
    assert_eq!(err.status_code(), 400);
}
