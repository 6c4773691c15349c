//! Error types for Carematch server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::models::center::CenterScheduleSummary;

/// Machine-readable error codes returned in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    DbFailure = 2,
    TransactionFailure = 3,
    NoSuchData = 4,
    NoDependentFound = 5,
    NoMatchingDependent = 6,
    InvalidDate = 7,
    NoCentersInArea = 8,
    PartialUnavailability = 9,
    BadValue = 10,
    InvalidTransition = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No dependents found for guardian {0}")]
    NoDependentFound(uuid::Uuid),

    #[error("No dependent found matching \"{0}\"")]
    NoMatchingDependent(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No childcare centers found in zip code {0}")]
    NoCentersInArea(String),

    #[error("No available centers found for {} requested date(s)", unavailable_dates.len())]
    PartialUnavailability {
        unavailable_dates: Vec<NaiveDate>,
        available_centers: Vec<CenterScheduleSummary>,
    },

    #[error("Transaction failed: {0}")]
    TransactionFailure(sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Dates no candidate center can serve (partial unavailability only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable_dates: Option<Vec<NaiveDate>>,
    /// Schedules of every candidate center (partial unavailability only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_centers: Option<Vec<CenterScheduleSummary>>,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData),
            AppError::NoDependentFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoDependentFound),
            AppError::NoMatchingDependent(_) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoMatchingDependent)
            }
            AppError::InvalidDate(_) => (StatusCode::BAD_REQUEST, ErrorCode::InvalidDate),
            AppError::NoCentersInArea(_) => (StatusCode::NOT_FOUND, ErrorCode::NoCentersInArea),
            AppError::PartialUnavailability { .. } => {
                (StatusCode::BAD_REQUEST, ErrorCode::PartialUnavailability)
            }
            AppError::TransactionFailure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::TransactionFailure)
            }
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Validation(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue)
            }
            AppError::Conflict(_) => (StatusCode::CONFLICT, ErrorCode::InvalidTransition),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }

    /// Build the JSON body sent to the caller
    pub fn to_response_body(&self) -> ErrorResponse {
        let (_, code) = self.status_and_code();

        let message = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::TransactionFailure(e) => {
                tracing::error!("Booking transaction rolled back: {:?}", e);
                "Booking could not be saved, nothing was persisted".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::NotFound(msg)
            | AppError::Validation(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => msg.clone(),
            other => other.to_string(),
        };

        let (unavailable_dates, available_centers) = match self {
            AppError::PartialUnavailability {
                unavailable_dates,
                available_centers,
            } => (Some(unavailable_dates.clone()), Some(available_centers.clone())),
            _ => (None, None),
        };

        ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            unavailable_dates,
            available_centers,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        (status, Json(self.to_response_body())).into_response()
    }
}

/// True when a database error is a PostgreSQL foreign key violation
pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23503")
}

/// True when a database error is a PostgreSQL unique constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23505")
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
