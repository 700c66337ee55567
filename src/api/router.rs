use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, auth, user, event, registration, rating, catalog};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, warn, Span, error, info};
use uuid::Uuid;

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Ignoring invalid CORS origin: {}", origin);
            layer
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/profile", get(auth::profile))

        // Users
        .route("/api/users", get(user::list_users))
        .route("/api/users/{id}", get(user::get_user).put(user::update_user).delete(user::delete_user))

        // Events
        .route("/api/events", post(event::create_event).get(event::list_events))
        .route("/api/events/popular", get(event::popular_events))
        .route("/api/events/registered", get(registration::registered_events))
        .route("/api/events/unregistered", get(registration::unregistered_events))
        .route("/api/events/{id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Registration
        .route("/api/events/{id}/register", post(registration::register_for_event))
        .route("/api/events/{id}/registrants", get(registration::list_registrants))
        .route("/api/events/{id}/check-registration", get(registration::check_registration))

        // Ratings
        .route("/api/events/{id}/ratings", get(rating::list_event_ratings))
        .route("/api/ratings", post(rating::create_rating))
        .route("/api/ratings/{id}", put(rating::update_rating).delete(rating::delete_rating))

        // Catalog
        .route("/api/categories", post(catalog::create_category).get(catalog::list_categories))
        .route("/api/categories/{id}", get(catalog::get_category).put(catalog::update_category).delete(catalog::delete_category))
        .route("/api/locations", post(catalog::create_location).get(catalog::list_locations))
        .route("/api/locations/{id}", get(catalog::get_location).put(catalog::update_location).delete(catalog::delete_location))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}
