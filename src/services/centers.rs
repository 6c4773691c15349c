//! Centers service (operating pattern, schedule exceptions)

use std::collections::BTreeSet;

use uuid::Uuid;
use validator::Validate;

use crate::{
    booking::calendar,
    error::{AppError, AppResult},
    models::center::{
        Center, CreateCenter, CreateScheduleException, ScheduleException, ScheduleExceptionQuery,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CentersService {
    repository: Repository,
}

impl CentersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Centers ----
    pub async fn list(&self, zip_code: Option<&str>) -> AppResult<Vec<Center>> {
        self.repository.centers.list(zip_code).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Center> {
        self.repository.centers.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateCenter) -> AppResult<Center> {
        data.validate()?;
        let days = normalize_operating_days(&data.operating_days)?;
        let center = self.repository.centers.create(data, &days).await?;
        tracing::info!(center_id = %center.id, zip_code = %center.zip_code, "Center created");
        Ok(center)
    }

    // ---- Schedule exceptions ----
    pub async fn list_exceptions(
        &self,
        center_id: Uuid,
        query: &ScheduleExceptionQuery,
    ) -> AppResult<Vec<ScheduleException>> {
        let start_date = query.start_date.as_deref().map(calendar::parse_date).transpose()?;
        let end_date = query.end_date.as_deref().map(calendar::parse_date).transpose()?;

        // 404 for an unknown center rather than an empty list
        self.repository.centers.get_by_id(center_id).await?;
        self.repository
            .centers
            .list_exceptions(center_id, start_date, end_date)
            .await
    }

    pub async fn upsert_exception(
        &self,
        center_id: Uuid,
        data: &CreateScheduleException,
    ) -> AppResult<ScheduleException> {
        data.validate()?;
        let date = calendar::parse_date(&data.date)?;
        self.repository
            .centers
            .upsert_exception(center_id, date, data.is_closed, data.capacity_override)
            .await
    }

    pub async fn delete_exception(&self, id: Uuid) -> AppResult<()> {
        self.repository.centers.delete_exception(id).await
    }
}

/// Deduplicated ISO weekdays, accepting 0 as Sunday
fn normalize_operating_days(raw: &[i16]) -> AppResult<Vec<u8>> {
    let mut days = BTreeSet::new();
    for &day in raw {
        let iso = calendar::normalize_weekday(day).ok_or_else(|| {
            AppError::Validation(format!("operating_days: {} is not a weekday (0-7)", day))
        })?;
        days.insert(iso);
    }
    Ok(days.into_iter().collect())
}
