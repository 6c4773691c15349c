//! Guardians repository (read-only)

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::guardian::{Dependent, Guardian},
};

#[derive(Clone)]
pub struct GuardiansRepository {
    pool: Pool<Postgres>,
}

impl GuardiansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get guardian by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Guardian> {
        sqlx::query_as::<_, Guardian>("SELECT * FROM guardians WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Guardian {} not found", id)))
    }

    /// List a guardian's dependents, oldest record first
    pub async fn list_dependents(&self, guardian_id: Uuid) -> AppResult<Vec<Dependent>> {
        let rows = sqlx::query_as::<_, Dependent>(
            "SELECT * FROM dependents WHERE guardian_id = $1 ORDER BY created_at, id",
        )
        .bind(guardian_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
