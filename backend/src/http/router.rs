//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing).

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route("/reservations", patch(handlers::update_reservation))
        .route(
            "/reservations/{guest_id}",
            get(handlers::list_reservations).post(handlers::create_reservation),
        )
        .route("/locations", post(handlers::create_location))
        .route("/locations/{id}", get(handlers::get_location))
        .route("/guests", post(handlers::create_guest))
        .route("/guests/{guest_id}", get(handlers::get_guest))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
