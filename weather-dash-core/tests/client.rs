//! OpenWeather client against a mock provider.

use serde_json::json;
use weather_dash_core::{ClientError, Coordinates, OpenWeatherClient, WeatherApi};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn current_json(name: &str) -> serde_json::Value {
    json!({
        "coord": { "lon": 106.85, "lat": -6.21 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "main": { "temp": 30.6, "feels_like": 35.4, "temp_min": 29.9, "temp_max": 31.2, "pressure": 1009, "humidity": 66 },
        "wind": { "speed": 4.12, "deg": 300 },
        "dt": 1710140400,
        "sys": { "country": "ID", "sunrise": 1710111200, "sunset": 1710155100 },
        "name": name,
        "cod": 200
    })
}

fn forecast_entry(dt: i64, temp: f64, icon: &str) -> serde_json::Value {
    json!({
        "dt": dt,
        "main": { "temp": temp, "feels_like": temp, "humidity": 72 },
        "weather": [{ "id": 500, "main": "Rain", "description": "light rain", "icon": icon }],
        "wind": { "speed": 2.5, "deg": 180 },
        "dt_txt": "ignored"
    })
}

#[tokio::test]
async fn current_by_city_sends_key_units_and_city() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Jakarta"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json("Jakarta")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("TEST_KEY".into(), server.uri());
    let current = client.current_by_city("Jakarta").await.unwrap();

    assert_eq!(current.city_name, "Jakarta");
    assert_eq!(current.country_code, "ID");
    assert_eq!(current.condition, "Clouds");
    assert_eq!(current.description, "broken clouds");
    assert_eq!(current.humidity_pct, 66);
}

#[tokio::test]
async fn forecast_by_city_hits_forecast_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Bandung"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cod": "200",
            "cnt": 2,
            "list": [
                forecast_entry(1710147600, 22.1, "10d"),
                forecast_entry(1710158400, 20.4, "10n"),
            ],
            "city": { "name": "Bandung", "country": "ID" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let samples = client.forecast_by_city("Bandung").await.unwrap();

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].timestamp.timestamp(), 1710147600);
    assert_eq!(samples[1].icon_code, "10n");
    assert_eq!(samples[1].weather_main, "Rain");
}

#[tokio::test]
async fn current_by_coords_sends_lat_lon() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "-6.2"))
        .and(query_param("lon", "106.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_json("Jakarta")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let current = client.current_by_coords(Coordinates::new(-6.2, 106.8)).await.unwrap();

    assert_eq!(current.city_name, "Jakarta");
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"cod":"404","message":"city not found"}"#),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let err = client.current_by_city("Nowhereville").await.unwrap_err();

    match err {
        ClientError::Status { status, ref body, .. } => {
            assert_eq!(status.as_u16(), 404);
            assert!(body.contains("city not found"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let err = client.forecast_by_city("Bandung").await.unwrap_err();

    assert!(matches!(err, ClientError::Decode { endpoint: "forecast", .. }));
}

#[tokio::test]
async fn current_without_weather_condition_is_rejected() {
    let server = MockServer::start().await;
    let mut body = current_json("Jakarta");
    body["weather"] = json!([]);
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let err = client.current_by_city("Jakarta").await.unwrap_err();

    assert!(matches!(err, ClientError::Malformed { endpoint: "weather", .. }));
}

#[tokio::test]
async fn forecast_entries_without_weather_condition_are_dropped() {
    let server = MockServer::start().await;
    let mut bare = forecast_entry(1710158400, 20.4, "10n");
    bare["weather"] = json!([]);
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [forecast_entry(1710147600, 22.1, "10d"), bare]
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new("KEY".into(), server.uri());
    let samples = client.forecast_by_city("Bandung").await.unwrap();

    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].icon_code, "10d");
}

#[tokio::test]
async fn unreachable_provider_is_a_request_error() {
    // Nothing listens on port 1.
    let client = OpenWeatherClient::new("KEY".into(), "http://127.0.0.1:1");
    let err = client.current_by_city("Jakarta").await.unwrap_err();

    assert!(matches!(err, ClientError::Request { .. }));
}
