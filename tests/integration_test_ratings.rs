mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_average_and_unique_raters() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    for (name, score) in [("ria", 3), ("sam", 4), ("tom", 5)] {
        let (token, _) = app.signup(name).await;
        let (status, body) = app.request("POST", "/api/ratings", Some(&token), Some(json!({
            "event_id": event_id,
            "rating": score
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    let (status, body) = app.request("GET", &format!("/api/events/{}/ratings", event_id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["average_rating"], 4.0);
    assert_eq!(body["unique_raters"], 3);
    assert_eq!(body["ratings"].as_array().unwrap().len(), 3);

    let (_, detail) = app.request("GET", &format!("/api/events/{}", event_id), None, None).await;
    assert_eq!(detail["average_rating"], 4.0);
    assert_eq!(detail["unique_raters"], 3);
}

#[tokio::test]
async fn test_average_is_rounded_to_two_decimals() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    for (name, score) in [("ua", 5), ("ub", 5), ("uc", 4)] {
        let (token, _) = app.signup(name).await;
        app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": score }))).await;
    }

    let (_, body) = app.request("GET", &format!("/api/events/{}/ratings", event_id), None, None).await;
    assert_eq!(body["average_rating"], 4.67);
}

#[tokio::test]
async fn test_rating_validation_and_duplicates() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();
    let (token, _) = app.signup("vic").await;

    for bad in [0, 6, -3] {
        let (status, _) = app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": bad }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    let (status, _) = app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": "missing", "rating": 4 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.request("POST", "/api/ratings", None, Some(json!({ "event_id": event_id, "rating": 4 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": 4 }))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.request("POST", "/api/ratings", Some(&token), Some(json!({ "event_id": event_id, "rating": 2 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already rated"));
}

#[tokio::test]
async fn test_only_owner_can_change_rating() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let category = app.create_category(&admin, "Tech").await;
    let event = app.create_event(&admin, &category, json!({})).await;
    let event_id = event["id"].as_str().unwrap();

    let (owner, _) = app.signup("wes").await;
    let (other, _) = app.signup("xia").await;

    let (_, rating) = app.request("POST", "/api/ratings", Some(&owner), Some(json!({ "event_id": event_id, "rating": 2 }))).await;
    let uri = format!("/api/ratings/{}", rating["id"].as_str().unwrap());

    let (status, _) = app.request("PUT", &uri, Some(&other), Some(json!({ "rating": 1 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.request("DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app.request("GET", &format!("/api/events/{}/ratings", event_id), None, None).await;
    assert_eq!(body["ratings"][0]["rating"], 2);

    let (status, body) = app.request("PUT", &uri, Some(&owner), Some(json!({ "rating": 5 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 5);

    let (status, _) = app.request("PUT", &uri, Some(&owner), Some(json!({ "rating": 9 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("DELETE", &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.request("GET", &format!("/api/events/{}/ratings", event_id), None, None).await;
    assert_eq!(body["average_rating"], 0.0);
    assert_eq!(body["unique_raters"], 0);
}
