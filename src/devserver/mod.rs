//! # Dev Server Module
//!
//! In-memory implementation of the data service contract, for local
//! development and the HTTP integration tests:
//! - `/users`, `/workouts`, `/exercises`, `/meals` with the list filters
//! - Server-side id assignment and unique user emails
//! - JSON `{"detail": ...}` error bodies
//!
//! Nothing is persisted and nothing is authenticated.

pub mod handlers;
pub mod logging;

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::common::ServerConfig;
use crate::gateway::RecordStore;

/// Routes of the data service, without state or layers.
pub fn devserver_routes() -> Router {
    Router::new()
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route(
            "/workouts",
            get(handlers::list_workouts).post(handlers::create_workout),
        )
        .route(
            "/workouts/:id",
            patch(handlers::update_workout).delete(handlers::delete_workout),
        )
        .route(
            "/exercises",
            get(handlers::list_exercises).post(handlers::create_exercise),
        )
        .route("/meals", get(handlers::list_meals).post(handlers::create_meal))
        .route("/meals/:id", delete(handlers::delete_meal))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Full application: routes over `store`, body logging, CORS and tracing.
pub fn build_router(store: RecordStore, config: &ServerConfig) -> Router {
    devserver_routes()
        .layer(middleware::from_fn(logging::log_request_response))
        .layer(Extension(store))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        let config = ServerConfig {
            port: 0,
            cors_origins: vec!["http://localhost:5173".to_string(), "bad\norigin".to_string()],
        };
        // Building must not panic on the invalid entry
        let _router = build_router(RecordStore::new(), &config);
    }
}
