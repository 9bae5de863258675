//! Nominatim adapter tests against a mock geocoding server.

use httpmock::prelude::*;
use serde_json::json;

use route_planner::nominatim::{NominatimClient, NominatimConfig};
use route_planner::planner::{PlannerConfig, RoutePlanner};
use route_planner::traits::{AddressResolver, ResolveError};

use std::time::Duration;

fn client_for(server: &MockServer) -> NominatimClient {
    let config = NominatimConfig {
        base_url: server.base_url(),
        ..NominatimConfig::default()
    };
    NominatimClient::new(config).expect("client builds")
}

#[tokio::test]
async fn resolves_the_first_candidate() {
    let server = MockServer::start_async().await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("q", "Wynn Las Vegas")
                .query_param("format", "jsonv2")
                .query_param("limit", "1");
            then.status(200).json_body(json!([
                {"lat": "36.1263781", "lon": "-115.1658180", "display_name": "Wynn Las Vegas"},
                {"lat": "0.0", "lon": "0.0", "display_name": "decoy"}
            ]));
        })
        .await;

    let client = client_for(&server);
    let coordinate = client.resolve("Wynn Las Vegas").await.unwrap();

    assert!((coordinate.latitude - 36.1263781).abs() < 1e-9);
    assert!((coordinate.longitude - -115.1658180).abs() < 1e-9);
    search.assert_async().await;
}

#[tokio::test]
async fn empty_candidate_list_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = client_for(&server);
    let err = client.resolve("no such place").await.unwrap_err();
    assert_eq!(err, ResolveError::NotFound);
}

#[tokio::test]
async fn server_error_is_transient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(500);
        })
        .await;

    let client = client_for(&server);
    let err = client.resolve("Wynn Las Vegas").await.unwrap_err();
    assert!(matches!(err, ResolveError::Transient(_)), "got {:?}", err);
}

#[tokio::test]
async fn malformed_coordinates_are_transient() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search");
            then.status(200)
                .json_body(json!([{"lat": "not a number", "lon": "-115.0"}]));
        })
        .await;

    let client = client_for(&server);
    let err = client.resolve("Wynn Las Vegas").await.unwrap_err();
    assert!(matches!(err, ResolveError::Transient(_)), "got {:?}", err);
}

#[tokio::test]
async fn plans_end_to_end_through_the_adapter() {
    let server = MockServer::start_async().await;
    let places = [
        ("Bellagio", "36.1126", "-115.1767"),
        ("MGM Grand", "36.1023654", "-115.1688720"),
        ("Caesars Palace", "36.1162", "-115.1745"),
    ];
    for (name, lat, lon) in places {
        server
            .mock_async(move |when, then| {
                when.method(GET).path("/search").query_param("q", name);
                then.status(200).json_body(json!([{"lat": lat, "lon": lon}]));
            })
            .await;
    }

    let config = PlannerConfig {
        pacing_delay: Duration::from_millis(1),
        ..PlannerConfig::default()
    };
    let planner = RoutePlanner::new(client_for(&server), config);
    let tour = planner
        .plan_route(
            "Bellagio",
            &["MGM Grand".to_string(), "Caesars Palace".to_string()],
        )
        .await
        .expect("planning through the mock geocoder succeeds");

    assert_eq!(tour.start().label(), "Bellagio");
    assert_eq!(tour.stops().len(), 2);
    assert!(tour.total_distance_km() > 0.0);
}
