use sqlx::PgPool;
use uuid::Uuid;

use super::ExerciseStore;
use crate::dto::exercise::ExerciseFields;
use crate::error::{Result, StorageError};
use crate::models::Exercise;

/// PostgreSQL-backed exercise store.
#[derive(Clone)]
pub struct PgExerciseRepository {
    pool: PgPool,
}

impl PgExerciseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ExerciseStore for PgExerciseRepository {
    async fn insert(&self, fields: &ExerciseFields) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (username, description, duration, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, description, duration, date, created_at, updated_at
            "#,
        )
        .bind(&fields.username)
        .bind(&fields.description)
        .bind(fields.duration)
        .bind(fields.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(exercise)
    }

    async fn get_all(&self) -> Result<Vec<Exercise>> {
        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, username, description, duration, date, created_at, updated_at
            FROM exercises
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(exercises)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, username, description, duration, date, created_at, updated_at
            FROM exercises
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(exercise)
    }

    async fn update_by_id(&self, id: Uuid, fields: &ExerciseFields) -> Result<Exercise> {
        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            UPDATE exercises
            SET username = $2,
                description = $3,
                duration = $4,
                date = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, description, duration, date, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&fields.username)
        .bind(&fields.description)
        .bind(fields.duration)
        .bind(fields.date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(exercise)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
