mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_category_crud() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let id = app.create_category(&admin, "Tech").await;
    let uri = format!("/api/categories/{}", id);

    let (status, body) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tech");

    let (status, body) = app.request("PUT", &uri, Some(&admin), Some(json!({ "name": "Technology" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Technology");

    let (_, list) = app.request("GET", "/api/categories", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = app.request("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.request("GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.request("PUT", &uri, Some(&admin), Some(json!({ "name": "Again" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_location_crud() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let id = app.create_location(&admin, "Bandung").await;
    let uri = format!("/api/locations/{}", id);

    let (status, body) = app.request("PUT", &uri, Some(&admin), Some(json!({ "city": "Surabaya" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Surabaya");

    let (status, _) = app.request("POST", "/api/locations", Some(&admin), Some(json!({ "city": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.request("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.request("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_writes_require_admin() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let (user, _) = app.signup("pat").await;

    let (status, _) = app.request("POST", "/api/categories", None, Some(json!({ "name": "Art" }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.request("POST", "/api/categories", Some(&user), Some(json!({ "name": "Art" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.request("POST", "/api/locations", Some(&user), Some(json!({ "city": "Medan" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let id = app.create_category(&admin, "Art").await;
    let (status, _) = app.request("DELETE", &format!("/api/categories/{}", id), Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, list) = app.request("GET", "/api/categories", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["name"], "Art");
}
