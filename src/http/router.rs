//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Booking CRUD and lifecycle
        .route("/bookings", get(handlers::list_bookings))
        .route("/bookings", post(handlers::create_booking))
        .route("/bookings/{booking_id}", get(handlers::get_booking))
        .route("/bookings/{booking_id}", put(handlers::update_booking))
        .route("/bookings/{booking_id}/actions", post(handlers::booking_action))
        // Day schedule
        .route("/schedule/{date}", get(handlers::get_day_schedule))
        .route("/schedule/{date}/conflicts", get(handlers::get_day_conflicts))
        // Resource directory
        .route("/staff", get(handlers::list_staff))
        .route("/aircraft", get(handlers::list_aircraft))
        .route("/aircraft/{aircraft_id}/defects", get(handlers::aircraft_defects))
        .route("/aircraft/{aircraft_id}/flights", get(handlers::aircraft_flights))
        // Members
        .route("/members", get(handlers::list_members))
        .route("/members", post(handlers::create_member))
        .route("/members/search", get(handlers::search_members))
        .route("/members/{member_id}", get(handlers::get_member))
        .route("/members/{member_id}", put(handlers::update_member))
        .route("/members/{member_id}/flights", get(handlers::member_flights))
        // Defects
        .route("/defects", get(handlers::list_defects))
        .route("/defects", post(handlers::report_defect))
        .route("/defects/{defect_id}/status", put(handlers::set_defect_status));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
