//! Booking and booking-day models

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{booking::lifecycle, error::AppError};

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Aggregate booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Draft,
    Pending,
    Partial,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Draft,
        BookingStatus::Pending,
        BookingStatus::Partial,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Draft => "DRAFT",
            BookingStatus::Pending => "PENDING",
            BookingStatus::Partial => "PARTIAL",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookingStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid status value: {}", s)))
    }
}

/// Status of a single booked day, set by the center's response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "booking_day_status", rename_all = "UPPERCASE")]
pub enum BookingDayStatus {
    Pending,
    Accepted,
    Declined,
}

impl BookingDayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingDayStatus::Pending => "PENDING",
            BookingDayStatus::Accepted => "ACCEPTED",
            BookingDayStatus::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for BookingDayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingDayStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingDayStatus::Pending),
            "ACCEPTED" => Ok(BookingDayStatus::Accepted),
            "DECLINED" => Ok(BookingDayStatus::Declined),
            _ => Err(AppError::BadRequest(format!("Invalid status value: {}", s))),
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Booking header from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub dependent_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking day from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDay {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub date: NaiveDate,
    pub center_id: Option<Uuid>,
    pub status: BookingDayStatus,
    pub center_responded_at: Option<DateTime<Utc>>,
}

/// A day to insert as part of a new booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookingDay {
    pub date: NaiveDate,
    pub center_id: Option<Uuid>,
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// Booking header joined with guardian and dependent names
#[derive(Debug, Clone, FromRow)]
pub struct BookingHeader {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub dependent_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guardian_name: String,
    pub guardian_email: String,
    pub dependent_name: String,
    pub dependent_birth_date: Option<NaiveDate>,
}

/// Booking day with the assigned center's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookingDayDetails {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub date: NaiveDate,
    pub center_id: Option<Uuid>,
    pub center_name: Option<String>,
    pub status: BookingDayStatus,
    pub center_responded_at: Option<DateTime<Utc>>,
}

/// Booking with full details for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingDetails {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub dependent_id: Uuid,
    pub status: BookingStatus,
    /// Status implied by the day responses; informational, never persisted
    pub suggested_status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub guardian_name: String,
    pub guardian_email: String,
    pub dependent_name: String,
    pub dependent_birth_date: Option<NaiveDate>,
    pub booking_days: Vec<BookingDayDetails>,
}

impl BookingDetails {
    pub fn new(header: BookingHeader, mut booking_days: Vec<BookingDayDetails>) -> Self {
        booking_days.sort_by_key(|day| day.date);
        let day_statuses: Vec<BookingDayStatus> = booking_days.iter().map(|d| d.status).collect();

        Self {
            suggested_status: lifecycle::suggested_status(header.status, &day_statuses),
            id: header.id,
            guardian_id: header.guardian_id,
            dependent_id: header.dependent_id,
            status: header.status,
            created_at: header.created_at,
            updated_at: header.updated_at,
            guardian_name: header.guardian_name,
            guardian_email: header.guardian_email,
            dependent_name: header.dependent_name,
            dependent_birth_date: header.dependent_birth_date,
            booking_days,
        }
    }
}

/// How the requested days were spread over centers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AssignmentSummary {
    pub total_days: usize,
    pub centers_used: usize,
    /// Center name -> number of assigned days
    pub center_breakdown: BTreeMap<String, usize>,
}

/// Response of the intelligent booking endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IntelligentBookingResponse {
    #[serde(flatten)]
    pub booking: BookingDetails,
    pub assignment_summary: AssignmentSummary,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Structured booking request; the engine picks the centers
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IntelligentBookingRequest {
    pub guardian_id: Uuid,
    /// Single date (YYYY-MM-DD); ignored when `request_dates` is given
    pub request_date: Option<String>,
    /// Several dates (YYYY-MM-DD)
    pub request_dates: Option<Vec<String>>,
    /// Case-insensitive partial match on the dependent's name
    pub dependent_name: Option<String>,
    /// Case-insensitive partial match on a center name in the guardian's area
    pub center_name: Option<String>,
}

/// One day in a manually assembled booking
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookingDay {
    /// Date (YYYY-MM-DD)
    pub date: String,
    pub center_id: Option<Uuid>,
}

/// Manual booking request with explicit days
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBooking {
    pub guardian_id: Uuid,
    pub dependent_id: Uuid,
    pub booking_days: Vec<CreateBookingDay>,
}

/// Update booking status request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatus {
    /// DRAFT, PENDING, PARTIAL, CONFIRMED or CANCELLED
    pub status: String,
}

/// A center's response to a booked day
#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondToBookingDay {
    /// ACCEPTED or DECLINED
    pub status: String,
}

/// Query parameters for booking listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    pub status: Option<String>,
    pub guardian_id: Option<Uuid>,
    pub center_id: Option<Uuid>,
}

/// Parsed booking listing filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub guardian_id: Option<Uuid>,
    pub center_id: Option<Uuid>,
}

impl TryFrom<BookingQuery> for BookingFilter {
    type Error = AppError;

    fn try_from(query: BookingQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            status: query.status.as_deref().map(str::parse::<BookingStatus>).transpose()?,
            guardian_id: query.guardian_id,
            center_id: query.center_id,
        })
    }
}
