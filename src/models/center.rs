//! Center models (operating pattern, schedule exceptions)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// ---------------------------------------------------------------------------
// Center
// ---------------------------------------------------------------------------

/// A childcare center together with its weekly operating pattern
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Center {
    pub id: Uuid,
    pub name: String,
    /// Advisory daily capacity, not enforced during assignment
    pub daily_capacity: i32,
    pub zip_code: String,
    /// ISO weekdays (1=Monday, 7=Sunday) on which the center accepts children
    pub operating_days: Vec<i16>,
    pub created_at: DateTime<Utc>,
}

/// Create center request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCenter {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, message = "daily_capacity must not be negative"))]
    pub daily_capacity: i32,
    #[validate(length(min = 1, message = "zip_code must not be empty"))]
    pub zip_code: String,
    /// Weekdays 1=Monday..7=Sunday; 0 is accepted as Sunday
    #[serde(default)]
    pub operating_days: Vec<i16>,
}

/// Query parameters for center listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CenterQuery {
    /// Restrict to one postal area
    pub zip_code: Option<String>,
}

// ---------------------------------------------------------------------------
// ScheduleException
// ---------------------------------------------------------------------------

/// A date-specific override of a center's weekly pattern
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ScheduleException {
    pub id: Uuid,
    pub center_id: Uuid,
    pub date: NaiveDate,
    pub is_closed: bool,
    /// Recorded but not yet used to gate availability
    pub capacity_override: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Create (or replace) a schedule exception
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleException {
    /// Exception date (YYYY-MM-DD)
    pub date: String,
    #[serde(default = "default_is_closed")]
    pub is_closed: bool,
    #[validate(range(min = 0, message = "capacity_override must not be negative"))]
    pub capacity_override: Option<i32>,
}

fn default_is_closed() -> bool {
    true
}

/// Query parameters for schedule exceptions
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ScheduleExceptionQuery {
    /// Filter exceptions from this date (YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Filter exceptions until this date (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// A candidate center's schedule as reported back when dates cannot be served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CenterScheduleSummary {
    pub name: String,
    /// Weekday names in Monday..Sunday order
    pub operating_days: Vec<String>,
    /// Requested dates on which the center is closed by exception
    pub closed_dates: Vec<NaiveDate>,
}
