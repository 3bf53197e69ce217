//! Exercise repository for database operations

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::fetch_exercise;
use crate::error::ApiResult;
use crate::models::{Exercise, NewExercise};
use crate::validation::ValidationErrors;

/// Exercise repository for database operations
#[derive(Clone)]
pub struct ExerciseRepository {
    pool: SqlitePool,
}

impl ExerciseRepository {
    /// Create a new exercise repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all exercises
    pub async fn list(&self) -> ApiResult<Vec<Exercise>> {
        let exercises = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, name, category, equipment_needed
            FROM exercises
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(exercises)
    }

    /// Find an exercise by ID
    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<Exercise>> {
        let mut conn = self.pool.acquire().await?;
        fetch_exercise(&mut conn, id).await
    }

    /// Create a new exercise
    pub async fn create(&self, new_exercise: &NewExercise) -> ApiResult<Exercise> {
        let mut tx = self.pool.begin().await?;

        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE name = ?")
            .bind(&new_exercise.name)
            .fetch_one(&mut *tx)
            .await?;

        if taken > 0 {
            return Err(ValidationErrors::single(
                "name",
                "An exercise with this name already exists.",
            )
            .into());
        }

        let exercise = Self::insert(&mut tx, new_exercise).await?;

        tx.commit().await?;

        info!("Created exercise {} ({})", exercise.id, exercise.name);
        Ok(exercise)
    }

    /// Insert an exercise on an open connection, re-running its field checks
    pub async fn insert(
        conn: &mut SqliteConnection,
        new_exercise: &NewExercise,
    ) -> ApiResult<Exercise> {
        new_exercise.validate()?;

        let exercise = sqlx::query_as::<_, Exercise>(
            r#"
            INSERT INTO exercises (name, category, equipment_needed)
            VALUES (?, ?, ?)
            RETURNING id, name, category, equipment_needed
            "#,
        )
        .bind(&new_exercise.name)
        .bind(new_exercise.category)
        .bind(new_exercise.equipment_needed)
        .fetch_one(&mut *conn)
        .await?;

        Ok(exercise)
    }

    /// Delete an exercise and every workout exercise referencing it
    ///
    /// Returns `false` when no exercise has the given ID.
    pub async fn delete(&self, id: i64) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        if fetch_exercise(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        let detached = sqlx::query("DELETE FROM workout_exercises WHERE exercise_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Deleted exercise {} and {} workout exercises", id, detached);
        Ok(true)
    }
}
