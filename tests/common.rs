#![allow(dead_code)]

use event_backend::{
    api::router::create_router,
    config::Config,
    domain::models::{
        event::{CapacityChange, Event},
        registration::RegistrationNotice,
        session::EventSession,
        user::{User, ROLE_ADMIN},
    },
    domain::ports::{EventRepository, Notifier},
    error::AppError,
    infra::factory::{run_sqlite_migrations, sqlite_repositories},
    state::{AppState, Repositories},
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use async_trait::async_trait;
use tower::ServiceExt;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Registration(String),
    Payment(String),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, notice: &RegistrationNotice) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(Sent::Registration(notice.recipient.clone()));
        Ok(())
    }

    async fn send_payment_confirmation(&self, notice: &RegistrationNotice) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(Sent::Payment(notice.recipient.clone()));
        Ok(())
    }
}

pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn send(&self, _notice: &RegistrationNotice) -> Result<(), AppError> {
        Err(AppError::Dependency("mail relay unreachable".into()))
    }

    async fn send_payment_confirmation(&self, _notice: &RegistrationNotice) -> Result<(), AppError> {
        Err(AppError::Dependency("mail relay unreachable".into()))
    }
}

/// Real event storage, except that popularity scores can never be saved.
pub struct ScorelessEvents {
    inner: Arc<dyn EventRepository>,
}

#[async_trait]
impl EventRepository for ScorelessEvents {
    async fn create(&self, event: &Event, sessions: &[EventSession]) -> Result<Event, AppError> {
        self.inner.create(event, sessions).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        self.inner.list().await
    }

    async fn list_by_popularity(&self) -> Result<Vec<Event>, AppError> {
        self.inner.list_by_popularity().await
    }

    async fn list_not_registered_by(&self, user_id: &str) -> Result<Vec<Event>, AppError> {
        self.inner.list_not_registered_by(user_id).await
    }

    async fn update(&self, event: &Event, capacity: Option<CapacityChange>, sessions: Option<&[EventSession]>) -> Result<Event, AppError> {
        self.inner.update(event, capacity, sessions).await
    }

    async fn update_popularity(&self, _id: &str, _score: f64) -> Result<(), AppError> {
        Err(AppError::InternalWithMsg("score store offline".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.inner.delete(id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        port: 0,
        mail_service_url: "http://localhost".to_string(),
        mail_service_token: "token".to_string(),
        mail_from: "events".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        cors_origin: "http://localhost:3000".to_string(),
        admin_username: None,
        admin_password: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let recorder = Arc::new(RecordingNotifier::default());
        Self::build(recorder.clone(), recorder, |repos| repos).await
    }

    pub async fn with_failing_notifier() -> Self {
        Self::build(Arc::new(FailingNotifier), Arc::new(RecordingNotifier::default()), |repos| repos).await
    }

    pub async fn with_failing_score_store() -> Self {
        let recorder = Arc::new(RecordingNotifier::default());
        Self::build(recorder.clone(), recorder, |repos| Repositories {
            event_repo: Arc::new(ScorelessEvents { inner: repos.event_repo.clone() }),
            ..repos
        }).await
    }

    async fn build(
        notifier: Arc<dyn Notifier>,
        recorder: Arc<RecordingNotifier>,
        wrap: impl FnOnce(Repositories) -> Repositories,
    ) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let config = test_config(&db_url);
        let state = Arc::new(AppState::new(config, wrap(sqlite_repositories(pool.clone())), notifier));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            notifier: recorder,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }

    /// Registers a regular user through the API and returns (token, user id).
    pub async fn signup(&self, username: &str) -> (String, String) {
        let (status, body) = self.request("POST", "/api/register", None, Some(json!({
            "username": username,
            "password": "password123"
        }))).await;
        assert_eq!(status, StatusCode::CREATED, "signup failed: {}", body);

        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    pub async fn admin_token(&self) -> String {
        let hash = self.state.auth_service.hash_password("adminpass").unwrap();
        let mut admin = User::new(format!("admin_{}", Uuid::new_v4()), hash);
        admin.role = ROLE_ADMIN.to_string();
        let admin = self.state.user_repo.create(&admin).await.unwrap();
        self.state.auth_service.issue_token(&admin).unwrap()
    }

    pub async fn create_category(&self, admin: &str, name: &str) -> String {
        let (status, body) = self.request("POST", "/api/categories", Some(admin), Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED, "category failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn create_location(&self, admin: &str, city: &str) -> String {
        let (status, body) = self.request("POST", "/api/locations", Some(admin), Some(json!({ "city": city }))).await;
        assert_eq!(status, StatusCode::CREATED, "location failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    /// Creates an online event; `overrides` replaces any default field.
    pub async fn create_event(&self, admin: &str, category_id: &str, overrides: Value) -> Value {
        let mut payload = json!({
            "name": "Rust Meetup",
            "description": "Monthly meetup",
            "date_start": "2099-06-01",
            "time": "19:00",
            "capacity": 10,
            "category_id": category_id,
            "link": "https://meet.example.com/rust"
        });
        if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }

        let (status, body) = self.request("POST", "/api/events", Some(admin), Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED, "event failed: {}", body);
        body
    }

    pub async fn register(&self, token: Option<&str>, event_id: &str, extra: Value) -> (StatusCode, Value) {
        let mut payload = json!({
            "name": "Dana",
            "email": "dana@example.com",
            "phone": "0800",
            "job": "Engineer"
        });
        if let (Some(base), Some(extra)) = (payload.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        self.request("POST", &format!("/api/events/{}/register", event_id), token, Some(payload)).await
    }

    pub async fn remaining_capacity(&self, event_id: &str) -> i64 {
        let (_, body) = self.request("GET", &format!("/api/events/{}", event_id), None, None).await;
        body["remaining_capacity"].as_i64().unwrap()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.notifier.sent.lock().unwrap().clone()
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
