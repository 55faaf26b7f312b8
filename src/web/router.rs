//! Router configuration for the HTTP API.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    city_share, country_cities, create_city, get_city, get_country, list_countries, login, me,
    signup, AppState,
};
use super::middleware::{create_cors_layer, protect};

/// Create the main API router.
///
/// Signup, login and reference-data reads are open. `/me` and city inserts
/// require a session.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let public_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/cities/:name", get(get_city))
        .route("/cities/:name/share", get(city_share))
        .route("/countries", get(list_countries))
        .route("/countries/:code", get(get_country))
        .route("/countries/:code/cities", get(country_cities));

    let protected_routes = protect(
        Router::new()
            .route("/me", get(me))
            .route("/cities", post(create_city)),
        app_state.clone(),
    );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
