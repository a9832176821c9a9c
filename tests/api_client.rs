use std::time::Duration;

use fantasy_hoops::api::{ApiClient, ApiError, CacheConfig, ResponseCache};
use fantasy_hoops::fetch::{fetch_model_comparison, fetch_player_records};
use fantasy_hoops::players::ModelType;
use fantasy_hoops::scoring::{rank_by_fantasy_score, ScoringWeights, StatCategory};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn client_for(server: &MockServer, dir: &TempDir, cache_enabled: bool) -> ApiClient {
    let cache = ResponseCache::new(
        dir.path().join("http-cache"),
        CacheConfig {
            enabled: cache_enabled,
            ttl: Duration::from_secs(60),
        },
    );
    ApiClient::new(&server.base_url(), Duration::from_secs(2), cache).expect("client builds")
}

fn roster_body() -> serde_json::Value {
    json!([
        {
            "PERSON_ID": 2544,
            "DISPLAY_FIRST_LAST": "LeBron James",
            "TEAM_ABBREVIATION": "LAL",
            "POSITION": "Forward",
            "HEIGHT": "6-9",
            "Points": 25.7,
            "REB": 7.3,
            "Points_5G_AVG": 28.0
        },
        {
            "PERSON_ID": 201939.0,
            "DISPLAY_FIRST_LAST": "Stephen Curry",
            "TEAM_ABBREVIATION": "GSW",
            "POSITION": "Guard",
            "Points": 26.4,
            "REB": null
        },
        {
            "PERSON_ID": 1629029,
            "DISPLAY_FIRST_LAST": "Luka Doncic",
            "TEAM_ABBREVIATION": "DAL",
            "POSITION": "Guard"
        }
    ])
}

fn predictions_body() -> serde_json::Value {
    json!([
        {"PERSON_ID": 201939, "next_Points": 27.0, "next_REB": 4.5, "next_AST": 5.0},
        {"PERSON_ID": 2544, "next_Points": 24.0, "next_REB": 8.0, "next_AST": 8.0},
        {"PERSON_ID": 999, "next_Points": 40.0}
    ])
}

#[tokio::test]
async fn fetch_player_records_joins_roster_and_predictions() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let players = server
        .mock_async(|when, then| {
            when.method(GET).path("/players");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(roster_body());
        })
        .await;
    let predictions = server
        .mock_async(|when, then| {
            when.method(GET).path("/predictions/ridge");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(predictions_body());
        })
        .await;

    let client = client_for(&server, &dir, false);
    let records = fetch_player_records(&client, ModelType::Ridge)
        .await
        .expect("fetch succeeds");

    players.assert_async().await;
    predictions.assert_async().await;

    // Prediction order, unmatched prediction dropped
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].display_name, "Stephen Curry");
    assert_eq!(records[1].display_name, "LeBron James");
    assert_eq!(records[1].recent.points, Some(28.0));
    assert_eq!(records[1].model, Some(ModelType::Ridge));

    let ranked = rank_by_fantasy_score(&records, &ScoringWeights::default());
    // 24 + 8*1.2 + 8*1.5 = 45.6 beats 27 + 4.5*1.2 + 5*1.5 = 39.9
    assert_eq!(ranked[0].record.person_id, 2544);
    assert_eq!(ranked[0].rank, 1);
}

#[tokio::test]
async fn client_error_status_is_not_retried() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/predictions/lstm");
            then.status(404).json_body(json!({"detail": "Model not found"}));
        })
        .await;

    let client = client_for(&server, &dir, false);
    let err = client.predictions(ModelType::Lstm).await.expect_err("404 is an error");

    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert!(!err.is_retryable());
    missing.assert_hits_async(1).await;
}

#[tokio::test]
async fn server_error_is_retried() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/models/available");
            then.status(503);
        })
        .await;

    let client = client_for(&server, &dir, false);
    let err = client.available_models().await.expect_err("503 is an error");

    assert!(matches!(err, ApiError::Status { status: 503, .. }));
    // First attempt plus three retries
    failing.assert_hits_async(4).await;
}

#[tokio::test]
async fn malformed_body_reports_decode_error() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let _mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/players");
            then.status(200).json_body(json!([{"DISPLAY_FIRST_LAST": "No Id"}]));
        })
        .await;

    let client = client_for(&server, &dir, false);
    let err = client.players().await.expect_err("record without PERSON_ID fails");
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn cached_response_served_when_server_fails() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let mut ok = server
        .mock_async(|when, then| {
            when.method(GET).path("/players");
            then.status(200).json_body(roster_body());
        })
        .await;

    let client = client_for(&server, &dir, true);
    let first = client.players().await.expect("first fetch succeeds");
    assert_eq!(first.len(), 3);

    // A fresh entry is served without touching the server
    let second = client.players().await.expect("cache hit");
    assert_eq!(second, first);
    ok.assert_hits_async(1).await;

    ok.delete_async().await;
    let _down = server
        .mock_async(|when, then| {
            when.method(GET).path("/players");
            then.status(500);
        })
        .await;

    // Refreshing skips the fresh entry, fails, then falls back to it
    let fallback = client.refreshing().players().await.expect("offline fallback");
    assert_eq!(fallback, first);
}

#[tokio::test]
async fn model_comparison_keeps_requested_order_and_skips_failures() {
    let server = MockServer::start_async().await;
    let dir = TempDir::new().unwrap();

    let _points = server
        .mock_async(|when, then| {
            when.method(GET).path("/stats/model_comparison").query_param("stat", "Points");
            then.status(200).json_body(json!({"ridge": 12.4, "lstm": null}));
        })
        .await;
    let _assists = server
        .mock_async(|when, then| {
            when.method(GET).path("/stats/model_comparison").query_param("stat", "AST");
            then.status(200).json_body(json!({"ridge": 3.1}));
        })
        .await;
    let _blocks = server
        .mock_async(|when, then| {
            when.method(GET).path("/stats/model_comparison").query_param("stat", "BLK");
            then.status(404);
        })
        .await;

    let client = client_for(&server, &dir, false);
    let categories = [StatCategory::Assists, StatCategory::Blocks, StatCategory::Points];
    let results = fetch_model_comparison(&client, &categories)
        .await
        .expect("partial success is ok");

    let order: Vec<StatCategory> = results.iter().map(|(c, _)| *c).collect();
    assert_eq!(order, vec![StatCategory::Assists, StatCategory::Points]);
    assert_eq!(results[1].1["ridge"], Some(12.4));
    assert_eq!(results[1].1["lstm"], None);
}
