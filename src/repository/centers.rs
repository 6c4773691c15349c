//! Centers repository (operating days, schedule exceptions)

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    booking::{calendar, CenterSchedule, ExceptionRule},
    error::{is_foreign_key_violation, AppError, AppResult},
    models::center::{Center, CreateCenter, ScheduleException},
};

const CENTER_SELECT: &str = r#"
    SELECT
        c.id, c.name, c.daily_capacity, c.zip_code, c.created_at,
        COALESCE(
            array_agg(cod.weekday ORDER BY cod.weekday) FILTER (WHERE cod.weekday IS NOT NULL),
            '{}'
        ) AS operating_days
    FROM centers c
    LEFT JOIN center_operating_days cod ON cod.center_id = c.id
"#;

#[derive(Clone)]
pub struct CentersRepository {
    pool: Pool<Postgres>,
}

impl CentersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // ---- Centers ----

    /// List centers ordered by name, optionally restricted to one postal area
    pub async fn list(&self, zip_code: Option<&str>) -> AppResult<Vec<Center>> {
        let query = match zip_code {
            Some(_) => format!("{} WHERE c.zip_code = $1 GROUP BY c.id ORDER BY c.name, c.id", CENTER_SELECT),
            None => format!("{} GROUP BY c.id ORDER BY c.name, c.id", CENTER_SELECT),
        };

        let mut builder = sqlx::query_as::<_, Center>(&query);
        if let Some(zip) = zip_code {
            builder = builder.bind(zip);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a center by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Center> {
        let query = format!("{} WHERE c.id = $1 GROUP BY c.id", CENTER_SELECT);
        sqlx::query_as::<_, Center>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Center {} not found", id)))
    }

    /// Create a center and its operating days in one transaction
    pub async fn create(&self, data: &CreateCenter, operating_days: &[u8]) -> AppResult<Center> {
        let mut tx = self.pool.begin().await?;

        let center_id: Uuid = sqlx::query_scalar(
            "INSERT INTO centers (name, daily_capacity, zip_code) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&data.name)
        .bind(data.daily_capacity)
        .bind(&data.zip_code)
        .fetch_one(&mut *tx)
        .await?;

        for weekday in operating_days {
            sqlx::query("INSERT INTO center_operating_days (center_id, weekday) VALUES ($1, $2)")
                .bind(center_id)
                .bind(*weekday as i16)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_by_id(center_id).await
    }

    /// Load the schedules of every center in a postal area, with the
    /// exceptions falling on the given dates
    pub async fn list_schedules_in_area(
        &self,
        zip_code: &str,
        dates: &[NaiveDate],
    ) -> AppResult<Vec<CenterSchedule>> {
        let centers = self.list(Some(zip_code)).await?;
        if centers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = centers.iter().map(|c| c.id).collect();
        let exceptions = sqlx::query_as::<_, ScheduleException>(
            r#"
            SELECT * FROM center_schedule_exceptions
            WHERE center_id = ANY($1) AND date = ANY($2)
            "#,
        )
        .bind(&ids)
        .bind(dates)
        .fetch_all(&self.pool)
        .await?;

        let mut by_center: HashMap<Uuid, Vec<ScheduleException>> = HashMap::new();
        for exception in exceptions {
            by_center.entry(exception.center_id).or_default().push(exception);
        }

        let schedules = centers
            .into_iter()
            .map(|center| {
                let days = center.operating_days.iter().filter_map(|d| calendar::normalize_weekday(*d));
                let mut schedule = CenterSchedule::new(center.id, center.name, center.daily_capacity)
                    .with_operating_days(days);

                for exception in by_center.remove(&center.id).unwrap_or_default() {
                    schedule = schedule.with_exception(
                        exception.date,
                        ExceptionRule {
                            is_closed: exception.is_closed,
                            capacity_override: exception.capacity_override,
                        },
                    );
                }
                schedule
            })
            .collect();

        Ok(schedules)
    }

    // ---- Schedule exceptions ----

    /// List a center's exceptions, optionally filtered by date range
    pub async fn list_exceptions(
        &self,
        center_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<ScheduleException>> {
        let mut conditions = vec!["center_id = $1".to_string()];
        let mut idx = 2;

        if start_date.is_some() {
            conditions.push(format!("date >= ${}", idx));
            idx += 1;
        }
        if end_date.is_some() {
            conditions.push(format!("date <= ${}", idx));
        }

        let query = format!(
            "SELECT * FROM center_schedule_exceptions WHERE {} ORDER BY date",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, ScheduleException>(&query).bind(center_id);
        if let Some(sd) = start_date { builder = builder.bind(sd); }
        if let Some(ed) = end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Create an exception, replacing any existing one on the same date
    pub async fn upsert_exception(
        &self,
        center_id: Uuid,
        date: NaiveDate,
        is_closed: bool,
        capacity_override: Option<i32>,
    ) -> AppResult<ScheduleException> {
        sqlx::query_as::<_, ScheduleException>(
            r#"
            INSERT INTO center_schedule_exceptions (center_id, date, is_closed, capacity_override)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (center_id, date)
            DO UPDATE SET is_closed = EXCLUDED.is_closed, capacity_override = EXCLUDED.capacity_override
            RETURNING *
            "#,
        )
        .bind(center_id)
        .bind(date)
        .bind(is_closed)
        .bind(capacity_override)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::NotFound(format!("Center {} not found", center_id))
            } else {
                AppError::Database(e)
            }
        })
    }

    /// Delete an exception
    pub async fn delete_exception(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM center_schedule_exceptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Schedule exception {} not found", id)));
        }
        Ok(())
    }
}
