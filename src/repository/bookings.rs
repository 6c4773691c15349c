//! Bookings repository, including the all-or-nothing booking transaction

use std::collections::HashMap;

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppError, AppResult},
    models::booking::{
        Booking, BookingDay, BookingDayDetails, BookingDayStatus, BookingDetails, BookingFilter,
        BookingHeader, BookingStatus, NewBookingDay,
    },
};

const HEADER_SELECT: &str = r#"
    SELECT
        b.id, b.guardian_id, b.dependent_id, b.status, b.created_at, b.updated_at,
        g.name AS guardian_name, g.email AS guardian_email,
        d.name AS dependent_name, d.birth_date AS dependent_birth_date
    FROM bookings b
    JOIN guardians g ON g.id = b.guardian_id
    JOIN dependents d ON d.id = b.dependent_id
"#;

const DAY_SELECT: &str = r#"
    SELECT
        bd.id, bd.booking_id, bd.date, bd.center_id, c.name AS center_name,
        bd.status, bd.center_responded_at
    FROM booking_days bd
    LEFT JOIN centers c ON c.id = bd.center_id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Persist a booking header in DRAFT and one PENDING day per entry.
    ///
    /// Runs in a single transaction: when any insert fails the transaction
    /// is rolled back and nothing is visible. A failed transaction is never
    /// retried here.
    pub async fn create_with_days(
        &self,
        guardian_id: Uuid,
        dependent_id: Uuid,
        days: &[NewBookingDay],
    ) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await.map_err(AppError::TransactionFailure)?;

        let booking_id: Uuid = sqlx::query_scalar(
            "INSERT INTO bookings (guardian_id, dependent_id, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(guardian_id)
        .bind(dependent_id)
        .bind(BookingStatus::Draft)
        .fetch_one(&mut *tx)
        .await
        .map_err(transaction_error)?;

        for day in days {
            sqlx::query(
                "INSERT INTO booking_days (booking_id, date, center_id, status) VALUES ($1, $2, $3, $4)",
            )
            .bind(booking_id)
            .bind(day.date)
            .bind(day.center_id)
            .bind(BookingDayStatus::Pending)
            .execute(&mut *tx)
            .await
            .map_err(transaction_error)?;
        }

        tx.commit().await.map_err(AppError::TransactionFailure)?;

        Ok(booking_id)
    }

    /// Get booking header by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Get a booking with guardian, dependent and per-day center names
    pub async fn get_details(&self, id: Uuid) -> AppResult<BookingDetails> {
        let header_query = format!("{} WHERE b.id = $1", HEADER_SELECT);
        let header = sqlx::query_as::<_, BookingHeader>(&header_query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))?;

        let day_query = format!("{} WHERE bd.booking_id = $1 ORDER BY bd.date", DAY_SELECT);
        let days = sqlx::query_as::<_, BookingDayDetails>(&day_query)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(BookingDetails::new(header, days))
    }

    /// List bookings, newest first
    pub async fn list(&self, filter: &BookingFilter) -> AppResult<Vec<BookingDetails>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if filter.status.is_some() {
            conditions.push(format!("b.status = ${}", idx));
            idx += 1;
        }
        if filter.guardian_id.is_some() {
            conditions.push(format!("b.guardian_id = ${}", idx));
            idx += 1;
        }
        if filter.center_id.is_some() {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM booking_days f WHERE f.booking_id = b.id AND f.center_id = ${})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("{} {} ORDER BY b.created_at DESC, b.id", HEADER_SELECT, where_clause);
        let mut builder = sqlx::query_as::<_, BookingHeader>(&query);
        if let Some(status) = filter.status { builder = builder.bind(status); }
        if let Some(guardian_id) = filter.guardian_id { builder = builder.bind(guardian_id); }
        if let Some(center_id) = filter.center_id { builder = builder.bind(center_id); }

        let headers = builder.fetch_all(&self.pool).await?;
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let day_query = format!("{} WHERE bd.booking_id = ANY($1) ORDER BY bd.date", DAY_SELECT);
        let days = sqlx::query_as::<_, BookingDayDetails>(&day_query)
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?;

        let mut by_booking: HashMap<Uuid, Vec<BookingDayDetails>> = HashMap::new();
        for day in days {
            by_booking.entry(day.booking_id).or_default().push(day);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let days = by_booking.remove(&header.id).unwrap_or_default();
                BookingDetails::new(header, days)
            })
            .collect())
    }

    /// Change the status if it still equals `from`.
    ///
    /// Returns `None` when the row was changed concurrently.
    pub async fn update_status(
        &self,
        id: Uuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $1, updated_at = now()
            WHERE id = $2 AND status = $3
            RETURNING *
            "#,
        )
        .bind(to)
        .bind(id)
        .bind(from)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Get booking day by ID
    pub async fn get_day(&self, id: Uuid) -> AppResult<BookingDay> {
        sqlx::query_as::<_, BookingDay>("SELECT * FROM booking_days WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking day {} not found", id)))
    }

    /// Record a center's response on a still-pending day.
    ///
    /// Returns `None` when the day was answered concurrently.
    pub async fn respond_to_day(
        &self,
        id: Uuid,
        status: BookingDayStatus,
    ) -> AppResult<Option<BookingDay>> {
        let row = sqlx::query_as::<_, BookingDay>(
            r#"
            UPDATE booking_days SET status = $1, center_responded_at = now()
            WHERE id = $2 AND status = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .bind(BookingDayStatus::Pending)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

/// Map an insert failure inside the booking transaction.
///
/// The transaction guard rolls back on drop, so every path out of
/// `create_with_days` before commit leaves nothing behind.
fn transaction_error(error: sqlx::Error) -> AppError {
    if is_foreign_key_violation(&error) {
        AppError::NotFound("Guardian, dependent or center referenced by the booking no longer exists".to_string())
    } else if is_unique_violation(&error) {
        AppError::BadRequest("A booking cannot contain the same date twice".to_string())
    } else {
        AppError::TransactionFailure(error)
    }
}
