mod common;

use abweather::{
    data::{
        geocode::GeocodeClient,
        geoip::{IpLocationProvider, LocationProvider, UNKNOWN_PLACE, locate},
        weather::WeatherClient,
    },
    domain::weather::{GeocodeResolution, Location},
};
use anyhow::Result;
use common::{DAY_SECS, NOON_UTC, berlin, current_payload, forecast_payload};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

async fn mount_weather(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_combines_current_and_bucketed_forecast() {
    let server = MockServer::start().await;
    mount_weather(&server).await;

    let client = WeatherClient::new(server.uri(), "test-key");
    let bundle = client.fetch(berlin()).await.expect("fetch");

    assert_eq!(bundle.location, berlin());
    assert_eq!(bundle.current.description, "scattered clouds");
    assert_eq!(bundle.current.humidity, 48);
    assert!((bundle.current.wind_speed_ms - 3.6).abs() < f32::EPSILON);
    // Seven feed days: the first is dropped, five are kept.
    assert_eq!(bundle.daily.len(), 5);
    assert_eq!(bundle.daily[0].dt, NOON_UTC + DAY_SECS);
    assert_eq!(bundle.daily[4].dt, NOON_UTC + 5 * DAY_SECS);
}

#[tokio::test]
async fn coordinates_are_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lon", "13.405"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri(), "test-key");
    let current = client.fetch_current(52.52, 13.405).await.expect("current");
    assert_eq!(current.icon, "03d");
}

#[tokio::test]
async fn unauthorized_maps_to_api_key_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri(), "bad-key");
    let err = client.fetch(berlin()).await.expect_err("401");
    assert!(format!("{err:#}").contains("invalid API key"));
}

#[tokio::test]
async fn malformed_forecast_fails_the_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_payload()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = WeatherClient::new(server.uri(), "test-key");
    let err = client.fetch(berlin()).await.expect_err("decode");
    assert!(format!("{err:#}").contains("forecast request failed"));
}

#[tokio::test]
async fn search_maps_direct_geocoding_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/direct"))
        .and(query_param("q", "Lagos"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Lagos", "lat": 6.455, "lon": 3.394, "country": "NG", "state": "Lagos" },
            { "name": "Lagos", "lat": 37.1, "lon": -8.67, "country": "PT", "local_names": {} }
        ])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(server.uri(), "test-key");
    let results = client.search("  Lagos ").await.expect("search");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].detail_name(), "Lagos, NG");
    assert_eq!(results[1].state, None);
    assert_eq!(results[1].country.as_deref(), Some("PT"));
}

#[tokio::test]
async fn short_query_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = GeocodeClient::new(server.uri(), "test-key");
    assert!(client.search("B").await.expect("search").is_empty());
    assert!(client.search("   ").await.expect("search").is_empty());
}

#[tokio::test]
async fn ambiguous_city_needs_disambiguation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/direct"))
        .and(query_param("q", "Springfield"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Springfield", "lat": 39.799, "lon": -89.644, "country": "US", "state": "Illinois" },
            { "name": "Springfield", "lat": 44.046, "lon": -123.022, "country": "US", "state": "Oregon" }
        ])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(server.uri(), "test-key");
    match client.resolve("Springfield".to_string()).await.expect("resolve") {
        GeocodeResolution::NeedsDisambiguation(options) => assert_eq!(options.len(), 2),
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_city_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(server.uri(), "test-key");
    match client.resolve("Atlantis".to_string()).await.expect("resolve") {
        GeocodeResolution::NotFound(city) => assert_eq!(city, "Atlantis"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn reverse_keeps_requested_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Mitte", "lat": 52.5200066, "lon": 13.404954, "country": "DE", "state": "Berlin" }
        ])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(server.uri(), "test-key");
    let named = client
        .reverse(52.52, 13.405)
        .await
        .expect("reverse")
        .expect("named");
    assert_eq!(named.name, "Mitte");
    assert!((named.latitude - 52.52).abs() < f64::EPSILON);
    assert!((named.longitude - 13.405).abs() < f64::EPSILON);
}

#[tokio::test]
async fn ip_provider_reads_position() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "city": "Lagos",
            "latitude": 6.455,
            "longitude": 3.394,
            "country_code": "NG",
            "region": "Lagos",
            "ip": "203.0.113.7"
        })))
        .mount(&server)
        .await;

    let provider = IpLocationProvider::new(server.uri());
    let location = provider.current_location().await.expect("locate");
    assert_eq!(location.display_name(), "Lagos, NG");
}

struct FixedProvider(Location);

impl LocationProvider for FixedProvider {
    async fn current_location(&self) -> Result<Location> {
        Ok(self.0.clone())
    }
}

fn unnamed_position() -> Location {
    Location {
        name: UNKNOWN_PLACE.to_string(),
        ..berlin()
    }
}

#[tokio::test]
async fn locate_names_unknown_positions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "Berlin", "lat": 52.52, "lon": 13.405, "country": "DE" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = GeocodeClient::new(server.uri(), "test-key");
    let location = locate(&FixedProvider(unnamed_position()), &geocoder)
        .await
        .expect("locate");
    assert_eq!(location.display_name(), "Berlin, DE");
}

#[tokio::test]
async fn locate_skips_reverse_for_named_positions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let geocoder = GeocodeClient::new(server.uri(), "test-key");
    let location = locate(&FixedProvider(berlin()), &geocoder)
        .await
        .expect("locate");
    assert_eq!(location, berlin());
}

#[tokio::test]
async fn locate_falls_back_when_reverse_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let geocoder = GeocodeClient::new(server.uri(), "test-key");
    let location = locate(&FixedProvider(unnamed_position()), &geocoder)
        .await
        .expect("locate");
    assert_eq!(location.name, UNKNOWN_PLACE);
}
