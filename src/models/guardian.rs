//! Guardian and dependent models
//!
//! Both tables are owned by the registration service; this server only reads them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Guardian (account holder) from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Guardian {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Home postal area, drives center search
    pub zip_code: String,
    #[serde(skip_serializing, default)]
    pub hashed_pass: String,
    pub created_at: DateTime<Utc>,
}

/// Dependent (child) from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Dependent {
    pub id: Uuid,
    pub guardian_id: Uuid,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}
