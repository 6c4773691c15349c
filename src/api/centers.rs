//! Center and schedule exception endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::center::{
        Center, CenterQuery, CreateCenter, CreateScheduleException, ScheduleException,
        ScheduleExceptionQuery,
    },
};

// ---- Centers ----

/// List centers
#[utoipa::path(
    get,
    path = "/centers",
    tag = "centers",
    params(CenterQuery),
    responses(
        (status = 200, description = "Centers ordered by name", body = Vec<Center>)
    )
)]
pub async fn list_centers(
    State(state): State<crate::AppState>,
    Query(query): Query<CenterQuery>,
) -> AppResult<Json<Vec<Center>>> {
    let centers = state.services.centers.list(query.zip_code.as_deref()).await?;
    Ok(Json(centers))
}

/// Create a center with its weekly operating pattern
#[utoipa::path(
    post,
    path = "/centers",
    tag = "centers",
    request_body = CreateCenter,
    responses(
        (status = 201, description = "Center created", body = Center),
        (status = 400, description = "Invalid center", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_center(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCenter>,
) -> AppResult<(StatusCode, Json<Center>)> {
    let center = state.services.centers.create(&data).await?;
    Ok((StatusCode::CREATED, Json(center)))
}

/// Get a center
#[utoipa::path(
    get,
    path = "/centers/{id}",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Center ID")),
    responses(
        (status = 200, description = "Center", body = Center),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_center(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Center>> {
    let center = state.services.centers.get(id).await?;
    Ok(Json(center))
}

// ---- Exceptions ----

/// List a center's schedule exceptions
#[utoipa::path(
    get,
    path = "/centers/{id}/exceptions",
    tag = "centers",
    params(
        ("id" = Uuid, Path, description = "Center ID"),
        ScheduleExceptionQuery
    ),
    responses(
        (status = 200, description = "Schedule exceptions by date", body = Vec<ScheduleException>),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_exceptions(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ScheduleExceptionQuery>,
) -> AppResult<Json<Vec<ScheduleException>>> {
    let exceptions = state.services.centers.list_exceptions(id, &query).await?;
    Ok(Json(exceptions))
}

/// Create or replace the exception on a date
#[utoipa::path(
    post,
    path = "/centers/{id}/exceptions",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Center ID")),
    request_body = CreateScheduleException,
    responses(
        (status = 201, description = "Exception saved", body = ScheduleException),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse),
        (status = 404, description = "Center not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn upsert_exception(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<CreateScheduleException>,
) -> AppResult<(StatusCode, Json<ScheduleException>)> {
    let exception = state.services.centers.upsert_exception(id, &data).await?;
    Ok((StatusCode::CREATED, Json(exception)))
}

/// Delete a schedule exception
#[utoipa::path(
    delete,
    path = "/exceptions/{id}",
    tag = "centers",
    params(("id" = Uuid, Path, description = "Exception ID")),
    responses(
        (status = 204, description = "Exception deleted"),
        (status = 404, description = "Exception not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_exception(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.centers.delete_exception(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
