//! # Discogs Price Lookup Tests
//!
//! Exercises the search-then-price lookup against mock Discogs endpoints,
//! covering each point where the lookup can end early.

use serde_json::{json, Value};
use std::sync::Once;
use vinylvision::providers::marketplace::{discogs::DiscogsClient, PriceSource};
use vinylvision::{Metadata, Outcome};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

/// Initializes tracing for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt::init();
    });
}

const TOKEN: &str = "discogs-token";

fn metadata(value: Value) -> Metadata {
    value.as_object().cloned().unwrap()
}

fn arrival() -> Metadata {
    metadata(json!({
        "interpret": "ABBA",
        "album_title": "Arrival",
        "release_year": 1976,
        "country_printed": "Sweden",
        "catalog_number": "POLS 272"
    }))
}

async fn mount_search(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_returns_minimum_price() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .and(query_param("release_title", "Arrival"))
        .and(query_param("catno", "POLS 272"))
        .and(query_param("year", "1976"))
        .and(query_param("type", "release"))
        .and(header("authorization", "Discogs token=discogs-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 1234567, "title": "ABBA - Arrival" }, { "id": 42 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/marketplace/price_suggestions/1234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Mint (M)": { "currency": "EUR", "value": 41.3 },
            "Very Good Plus (VG+)": { "currency": "EUR", "value": 18.9 },
            "Good (G)": { "currency": "EUR", "value": 7.45 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.lookup_price(&arrival(), Some(TOKEN)).await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::Found(7.45));
}

#[tokio::test]
async fn test_search_omits_absent_fields() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    mount_search(&server, json!({ "results": [] })).await;
    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client
        .search_release(&metadata(json!({ "album_title": "Dummy", "catalog_number": null })), TOKEN)
        .await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
    let received = server.received_requests().await.unwrap();
    let query: Vec<(String, String)> = received[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert!(query.contains(&("release_title".to_string(), "Dummy".to_string())));
    assert!(!query.iter().any(|(k, _)| k == "catno" || k == "year"));
}

#[tokio::test]
async fn test_zero_results_is_not_found_without_price_call() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    mount_search(&server, json!({ "pagination": { "items": 0 }, "results": [] })).await;

    Mock::given(method("GET"))
        .and(path("/marketplace/price_suggestions/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.lookup_price(&arrival(), Some(TOKEN)).await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
}

#[tokio::test]
async fn test_first_result_without_id_is_not_found() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    mount_search(&server, json!({ "results": [{ "title": "No id here" }] })).await;
    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.lookup_price(&arrival(), Some(TOKEN)).await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
}

#[tokio::test]
async fn test_search_failure_is_transport_error() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.lookup_price(&arrival(), Some(TOKEN)).await;

    // --- 3. Assert ---
    match outcome {
        Outcome::TransportError(detail) => {
            assert!(detail.contains("500"));
            assert!(detail.contains("upstream down"));
        }
        other => panic!("Expected TransportError, but got {other:?}"),
    }
}

#[tokio::test]
async fn test_price_failure_is_transport_error() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    mount_search(&server, json!({ "results": [{ "id": "99" }] })).await;

    Mock::given(method("GET"))
        .and(path("/marketplace/price_suggestions/99"))
        .respond_with(ResponseTemplate::new(403).set_body_string("seller settings required"))
        .expect(1)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.lookup_price(&arrival(), Some(TOKEN)).await;

    // --- 3. Assert ---
    assert!(matches!(outcome, Outcome::TransportError(detail) if detail.contains("403")));
}

#[tokio::test]
async fn test_price_without_numeric_values_is_not_found() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;
    mount_search(&server, json!({ "results": [{ "id": 5 }] })).await;

    Mock::given(method("GET"))
        .and(path("/marketplace/price_suggestions/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Mint (M)": { "currency": "EUR" },
            "Near Mint (NM or M-)": { "currency": "EUR", "value": null }
        })))
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.price_suggestion("5", TOKEN).await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/database/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client.search_release(&arrival(), TOKEN).await;

    // --- 3. Assert ---
    assert!(matches!(outcome, Outcome::DecodeError(_)));
}

#[tokio::test]
async fn test_no_token_skips_network() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client
        .lookup_price(&metadata(json!({ "album_title": "Dummy" })), None)
        .await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_token_skips_network() {
    // --- 1. Arrange ---
    setup_tracing();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(0)
        .mount(&server)
        .await;

    let client = DiscogsClient::new(server.uri()).unwrap();

    // --- 2. Act ---
    let outcome = client
        .lookup_price(&metadata(json!({ "album_title": "Dummy" })), Some(""))
        .await;

    // --- 3. Assert ---
    assert_eq!(outcome, Outcome::NotFound);
    assert!(server.received_requests().await.unwrap().is_empty());
}
