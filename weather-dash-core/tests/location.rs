//! IP geolocation against a mock lookup service.

use serde_json::json;
use weather_dash_core::{Coordinates, Geolocator, IpGeolocator, LocationError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn locator_responding(template: ResponseTemplate) -> (MockServer, IpGeolocator) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(template)
        .expect(1)
        .mount(&server)
        .await;

    let locator = IpGeolocator::new(format!("{}/json", server.uri()));
    (server, locator)
}

#[tokio::test]
async fn success_response_yields_coordinates() {
    let (_server, locator) = locator_responding(ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "country": "Indonesia",
        "city": "Jakarta",
        "lat": -6.2,
        "lon": 106.8
    })))
    .await;

    let coords = locator.current_position().await.unwrap();

    assert_eq!(coords, Coordinates::new(-6.2, 106.8));
}

#[tokio::test]
async fn failed_lookup_reports_service_message() {
    let (_server, locator) = locator_responding(ResponseTemplate::new(200).set_body_json(json!({
        "status": "fail",
        "message": "private range",
        "query": "10.0.0.1"
    })))
    .await;

    match locator.current_position().await {
        Err(LocationError::Position(msg)) => assert_eq!(msg, "private range"),
        other => panic!("expected position error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_is_a_position_error() {
    let (_server, locator) =
        locator_responding(ResponseTemplate::new(503).set_body_string("unavailable")).await;

    match locator.current_position().await {
        Err(LocationError::Position(msg)) => assert!(msg.contains("503"), "{msg}"),
        other => panic!("expected position error, got {other:?}"),
    }
}

#[tokio::test]
async fn success_without_latitude_is_a_position_error() {
    let (_server, locator) = locator_responding(ResponseTemplate::new(200).set_body_json(json!({
        "status": "success",
        "lon": 106.8
    })))
    .await;

    match locator.current_position().await {
        Err(LocationError::Position(msg)) => assert_eq!(msg, "lookup returned no coordinates"),
        other => panic!("expected position error, got {other:?}"),
    }
}
