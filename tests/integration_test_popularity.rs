mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[tokio::test]
async fn test_score_follows_registrations_and_ratings() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();
    let uri = format!("/api/events/{}", event_id);

    let (_, detail) = app.request("GET", &uri, None, None).await;
    assert!(close(detail["popularity_score"].as_f64().unwrap(), 0.0));

    let (ana, _) = app.signup("ana").await;
    let (ben, _) = app.signup("ben").await;
    app.register(Some(&ana), event_id, json!({})).await;
    app.register(Some(&ben), event_id, json!({})).await;

    let (_, detail) = app.request("GET", &uri, None, None).await;
    assert!(close(detail["popularity_score"].as_f64().unwrap(), 1.4));

    app.request("POST", "/api/ratings", Some(&ana), Some(json!({ "event_id": event_id, "rating": 4 }))).await;
    app.request("POST", "/api/ratings", Some(&ben), Some(json!({ "event_id": event_id, "rating": 5 }))).await;

    // 0.7 * 2 registrations + 0.3 * 4.5 mean rating
    let (_, detail) = app.request("GET", &uri, None, None).await;
    assert!(close(detail["popularity_score"].as_f64().unwrap(), 2.75));
}

#[tokio::test]
async fn test_recompute_is_idempotent() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    let (token, _) = app.signup("cat").await;
    app.register(Some(&token), event_id, json!({})).await;
    app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": 3 }))).await;

    let first = app.state.popularity.recompute(event_id).await.unwrap();
    let second = app.state.popularity.recompute(event_id).await.unwrap();
    assert!(close(first, second));
    assert!(close(first, 0.7 + 0.9));
}

#[tokio::test]
async fn test_popular_events_ordering() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;

    let quiet = app.create_event(&admin, &category, json!({ "name": "Quiet" })).await;
    let busy = app.create_event(&admin, &category, json!({ "name": "Busy" })).await;
    let busy_id = busy["id"].as_str().unwrap();

    for name in ["dee", "eve", "fay"] {
        let (token, _) = app.signup(name).await;
        let (status, _) = app.register(Some(&token), busy_id, json!({})).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, popular) = app.request("GET", "/api/events/popular", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let popular = popular.as_array().unwrap();
    assert_eq!(popular.len(), 2);
    assert_eq!(popular[0]["id"], busy_id);
    assert_eq!(popular[0]["category"], "Tech");
    assert_eq!(popular[1]["id"], quiet["id"]);
    assert!(close(popular[0]["popularity_score"].as_f64().unwrap(), 2.1));
}

#[tokio::test]
async fn test_score_store_failure_does_not_fail_writes() {
    let app = TestApp::with_failing_score_store().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    let (token, user_id) = app.signup("gus").await;
    let (status, body) = app.register(Some(&token), event_id, json!({})).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let stored = app.state.registration_repo.find_by_user_and_event(&user_id, event_id).await.unwrap();
    assert!(stored.is_some());
    let (_, check) = app.request("GET", &format!("/api/events/{}/check-registration", event_id), Some(&token), None).await;
    assert_eq!(check["is_registered"], true);
    assert_eq!(app.remaining_capacity(event_id).await, 9);

    let (status, rating) = app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": 4 }))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", rating);
    let uri = format!("/api/ratings/{}", rating["id"].as_str().unwrap());
    let (status, _) = app.request("PUT", &uri, Some(&token), Some(json!({ "rating": 5 }))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = app.request("GET", &format!("/api/events/{}", event_id), None, None).await;
    assert!(close(detail["popularity_score"].as_f64().unwrap(), 0.0));
    assert_eq!(detail["average_rating"], 5.0);

    assert!(app.state.popularity.recompute(event_id).await.is_err());
}
