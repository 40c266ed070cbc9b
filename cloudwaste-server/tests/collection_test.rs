use axum::http::StatusCode;
use cloudwaste_api::models::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};

mod common;
use common::mock_app::MockApp;

#[tokio::test]
async fn test_collection_for_unknown_bin_is_rolled_back() {
    let app = MockApp::new().await;

    let (status, body): (_, ErrorResponse) = app
        .post(
            "/api/collections",
            &json!({ "bin_id": "GHOST", "truck_id": "TR001", "driver_id": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Database error");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM collections")
        .fetch_one(app.storage.get_pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_history_one_row_per_day_newest_first() {
    let app = MockApp::new().await;
    app.create_test_bin("B1", "Nlongkak", 50).await;
    let now = OffsetDateTime::now_utc();

    for days_ago in 0..7 {
        for _ in 0..=(days_ago % 3) {
            app.create_test_collection("B1", now - Duration::days(days_ago)).await;
        }
    }
    app.create_test_collection("B1", now - Duration::days(30)).await;

    let (status, history): (_, Vec<HistoryEntry>) = app.get("/api/collections/history?days=7").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.len(), 7);
    assert!(history.iter().all(|entry| entry.count > 0));
    assert!(history.windows(2).all(|pair| pair[0].date > pair[1].date));
    assert_eq!(history[0].count, 1);
    assert_eq!(history[1].count, 2);
    assert_eq!(history[2].count, 3);
}

#[tokio::test]
async fn test_history_defaults_to_seven_days() {
    let app = MockApp::new().await;
    app.create_test_bin("B1", "Nlongkak", 50).await;
    let now = OffsetDateTime::now_utc();

    app.create_test_collection("B1", now - Duration::days(2)).await;
    app.create_test_collection("B1", now - Duration::days(10)).await;

    let (_, default_window): (_, Vec<HistoryEntry>) = app.get("/api/collections/history").await;
    assert_eq!(default_window.len(), 1);

    let (_, wide_window): (_, Vec<HistoryEntry>) = app.get("/api/collections/history?days=30").await;
    assert_eq!(wide_window.len(), 2);
}
