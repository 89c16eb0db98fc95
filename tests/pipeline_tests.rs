//! Pipeline tests against a mocked Open-Meteo provider

use serde_json::{Value, json};
use skynow::geolocation::NoGeolocation;
use skynow::{ForecastPipeline, SkyNowConfig, SkyNowError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(server: &MockServer, include_hourly: bool) -> SkyNowConfig {
    let mut config = SkyNowConfig::default();
    config.weather.forecast_base_url = server.uri();
    config.weather.geocoding_base_url = server.uri();
    config.weather.include_hourly = include_hourly;
    config
}

fn daily_block(days: usize) -> Value {
    json!({
        "time": (0..days)
            .map(|i| format!("2023-12-{:02}", 4 + i))
            .collect::<Vec<_>>(),
        "weathercode": vec![61; days],
        "temperature_2m_max": vec![9.5; days],
        "temperature_2m_min": vec![2.5; days],
    })
}

fn hourly_block(days: usize) -> Value {
    let hours: Vec<String> = (0..days)
        .flat_map(|d| (0..24).map(move |h| format!("2023-12-{:02}T{h:02}:00", 4 + d)))
        .collect();
    let count = hours.len();
    json!({
        "time": hours,
        "temperature_2m": vec![5.0; count],
        "relativehumidity_2m": vec![80.0; count],
        "windspeed_10m": vec![12.0; count],
        "precipitation": vec![0.1; count],
        "weathercode": vec![3; count],
    })
}

fn istanbul_geocoding() -> Value {
    json!({
        "results": [{
            "name": "Istanbul",
            "latitude": 41.0,
            "longitude": 29.0,
            "country_code": "TR"
        }]
    })
}

#[tokio::test]
async fn empty_query_fails_validation_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline.resolve_by_name("   ").await.unwrap_err();

    assert!(matches!(err, SkyNowError::Validation { .. }));
    assert!(!pipeline.state().is_loading());
}

#[tokio::test]
async fn zero_geocoding_results_fail_without_forecast_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline.resolve_by_name("Atlantis").await.unwrap_err();

    assert!(matches!(err, SkyNowError::LocationNotFound { .. }));
    assert!(!pipeline.state().is_loading());
}

#[tokio::test]
async fn name_lookup_resolves_first_match_and_shapes_daily_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Istanbul"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_geocoding()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "daily": daily_block(3) })),
        )
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let result = pipeline.resolve_by_name("Istanbul").await.unwrap();

    assert!(result.location.display_name.contains("Istanbul"));
    assert!(result.location.display_name.contains("🇹🇷"));
    assert_eq!(result.location.latitude, 41.0);
    assert_eq!(result.location.longitude, 29.0);

    assert_eq!(result.daily.len(), 3);
    assert!(result.daily[0].date < result.daily[1].date);
    assert!(result.daily[1].date < result.daily[2].date);
    assert!(result.hourly.is_none());
    assert!(result.hourly_for_day(0).is_none());

    // The settled lookup committed its result and cleared the loading flag
    assert_eq!(pipeline.state().current().unwrap(), result);
    assert!(!pipeline.state().is_loading());
}

#[tokio::test]
async fn hourly_window_for_day_one_is_entries_24_to_48() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_geocoding()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": daily_block(2),
            "hourly": hourly_block(2),
        })))
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, true)).unwrap();
    let result = pipeline.resolve_by_name("Istanbul").await.unwrap();

    let hourly = result.hourly.as_ref().unwrap();
    assert_eq!(hourly.len(), 48);

    let window = result.hourly_for_day(1).unwrap();
    assert_eq!(window.len(), 24);
    assert_eq!(window, &hourly[24..48]);
    assert_eq!(window[0].timestamp.format("%Y-%m-%dT%H:%M").to_string(), "2023-12-05T00:00");

    // No third day exists
    assert!(result.hourly_for_day(2).is_none());
}

#[tokio::test]
async fn missing_daily_block_is_forecast_unavailable_and_clears_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_geocoding()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "latitude": 41.0, "longitude": 29.0 })),
        )
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline.resolve_by_name("Istanbul").await.unwrap_err();

    assert!(matches!(err, SkyNowError::ForecastUnavailable { .. }));
    assert!(!pipeline.state().is_loading());
    assert!(pipeline.state().current().is_none());
}

#[tokio::test]
async fn coordinate_lookup_uses_reverse_geocoded_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(istanbul_geocoding()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "auto"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "daily": daily_block(3) })),
        )
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let result = pipeline.resolve_by_coordinates(41.01, 28.97).await.unwrap();

    assert!(result.location.display_name.contains("Istanbul"));
    // The forecast stays at the queried device position
    assert_eq!(result.location.latitude, 41.01);
    assert_eq!(result.location.longitude, 28.97);
}

#[tokio::test]
async fn reverse_geocoding_failure_falls_back_to_placeholder_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/reverse"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "daily": daily_block(3) })),
        )
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let result = pipeline.resolve_by_coordinates(41.01, 28.97).await.unwrap();

    assert_eq!(result.location.display_name, "Current Location");
    assert_eq!(result.daily.len(), 3);
}

#[tokio::test]
async fn out_of_range_coordinates_fail_validation_without_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline.resolve_by_coordinates(91.0, 29.0).await.unwrap_err();

    assert!(matches!(err, SkyNowError::Validation { .. }));
}

#[tokio::test]
async fn missing_geolocation_capability_surfaces_distinctly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline
        .resolve_current_position(&NoGeolocation)
        .await
        .unwrap_err();

    assert!(matches!(err, SkyNowError::GeolocationUnsupported));
}

#[tokio::test]
async fn transport_failure_classifies_as_transport_and_clears_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let pipeline = ForecastPipeline::new(&test_config(&server, false)).unwrap();
    let err = pipeline.resolve_by_name("Istanbul").await.unwrap_err();

    assert!(matches!(err, SkyNowError::Transport { .. }));
    assert!(!pipeline.state().is_loading());
}
