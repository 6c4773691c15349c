//! Booking API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::booking::{
        BookingDay, BookingDetails, BookingFilter, BookingQuery, CreateBooking,
        IntelligentBookingRequest, IntelligentBookingResponse, RespondToBookingDay,
        UpdateBookingStatus,
    },
};

/// Create a booking with automatic center assignment
#[utoipa::path(
    post,
    path = "/bookings/intelligent",
    tag = "bookings",
    request_body = IntelligentBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = IntelligentBookingResponse),
        (status = 400, description = "Invalid date or unservable dates", body = crate::error::ErrorResponse),
        (status = 404, description = "Guardian, dependent or centers not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Booking transaction failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_intelligent_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<IntelligentBookingRequest>,
) -> AppResult<(StatusCode, Json<IntelligentBookingResponse>)> {
    let response = state.services.bookings.create_intelligent(&request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Create a booking from explicit days
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Invalid days", body = crate::error::ErrorResponse),
        (status = 404, description = "Guardian or dependent not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingDetails>)> {
    let booking = state.services.bookings.create_manual(&request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// List bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings, newest first", body = Vec<BookingDetails>),
        (status = 400, description = "Unknown status filter", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    let filter = BookingFilter::try_from(query)?;
    let bookings = state.services.bookings.list(&filter).await?;
    Ok(Json(bookings))
}

/// Get booking details
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking details", body = BookingDetails),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.get(id).await?;
    Ok(Json(booking))
}

/// Change a booking's aggregate status
#[utoipa::path(
    patch,
    path = "/bookings/{id}/status",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingStatus,
    responses(
        (status = 200, description = "Status updated", body = BookingDetails),
        (status = 400, description = "Unknown status value", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Transition not allowed", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateBookingStatus>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.update_status(id, &data.status).await?;
    Ok(Json(booking))
}

/// Cancel a booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = BookingDetails),
        (status = 404, description = "Booking not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Booking already settled", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingDetails>> {
    let booking = state.services.bookings.cancel(id).await?;
    Ok(Json(booking))
}

/// Record a center's response to one booked day
#[utoipa::path(
    patch,
    path = "/booking-days/{id}/respond",
    tag = "bookings",
    params(("id" = Uuid, Path, description = "Booking day ID")),
    request_body = RespondToBookingDay,
    responses(
        (status = 200, description = "Response recorded", body = BookingDay),
        (status = 400, description = "Status must be ACCEPTED or DECLINED", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking day not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Day already answered or booking cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn respond_to_booking_day(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<RespondToBookingDay>,
) -> AppResult<Json<BookingDay>> {
    let day = state.services.bookings.respond_to_day(id, &data.status).await?;
    Ok(Json(day))
}
