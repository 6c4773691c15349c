//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, centers, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Carematch API",
        version = "1.0.0",
        description = "Childcare booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Bookings
        bookings::create_intelligent_booking,
        bookings::create_booking,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::update_booking_status,
        bookings::cancel_booking,
        bookings::respond_to_booking_day,
        // Centers
        centers::list_centers,
        centers::create_center,
        centers::get_center,
        centers::list_exceptions,
        centers::upsert_exception,
        centers::delete_exception,
    ),
    components(
        schemas(
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::BookingDayStatus,
            crate::models::booking::Booking,
            crate::models::booking::BookingDay,
            crate::models::booking::BookingDayDetails,
            crate::models::booking::BookingDetails,
            crate::models::booking::AssignmentSummary,
            crate::models::booking::IntelligentBookingRequest,
            crate::models::booking::IntelligentBookingResponse,
            crate::models::booking::CreateBooking,
            crate::models::booking::CreateBookingDay,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::RespondToBookingDay,
            crate::models::booking::BookingQuery,
            // Centers
            crate::models::center::Center,
            crate::models::center::CreateCenter,
            crate::models::center::CenterQuery,
            crate::models::center::ScheduleException,
            crate::models::center::CreateScheduleException,
            crate::models::center::ScheduleExceptionQuery,
            crate::models::center::CenterScheduleSummary,
            // Guardians
            crate::models::guardian::Guardian,
            crate::models::guardian::Dependent,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookings", description = "Booking creation and lifecycle"),
        (name = "centers", description = "Centers and schedule exceptions")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
