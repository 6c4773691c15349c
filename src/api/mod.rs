//! API handlers for Carematch REST endpoints

pub mod bookings;
pub mod centers;
pub mod health;
pub mod openapi;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Bookings
        .route("/bookings", get(bookings::list_bookings))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/intelligent", post(bookings::create_intelligent_booking))
        .route("/bookings/:id", get(bookings::get_booking))
        .route("/bookings/:id/status", patch(bookings::update_booking_status))
        .route("/bookings/:id/cancel", post(bookings::cancel_booking))
        .route("/booking-days/:id/respond", patch(bookings::respond_to_booking_day))
        // Centers
        .route("/centers", get(centers::list_centers))
        .route("/centers", post(centers::create_center))
        .route("/centers/:id", get(centers::get_center))
        .route("/centers/:id/exceptions", get(centers::list_exceptions))
        .route("/centers/:id/exceptions", post(centers::upsert_exception))
        // Exceptions
        .route("/exceptions/:id", delete(centers::delete_exception))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
