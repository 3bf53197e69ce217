//! Workout exercise repository for database operations

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::{fetch_exercise, fetch_workout};
use crate::error::{ApiError, ApiResult};
use crate::models::{NewWorkoutExercise, WorkoutExercise};

/// Workout exercise repository for database operations
#[derive(Clone)]
pub struct WorkoutExerciseRepository {
    pool: SqlitePool,
}

impl WorkoutExerciseRepository {
    /// Create a new workout exercise repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Attach an exercise to a workout
    ///
    /// Both parents are looked up before the raw request body is even parsed,
    /// so a missing parent is always reported as not found.
    pub async fn create(
        &self,
        workout_id: i64,
        exercise_id: i64,
        body: &[u8],
    ) -> ApiResult<WorkoutExercise> {
        let mut tx = self.pool.begin().await?;

        if fetch_workout(&mut tx, workout_id).await?.is_none() {
            return Err(ApiError::not_found("Workout"));
        }
        if fetch_exercise(&mut tx, exercise_id).await?.is_none() {
            return Err(ApiError::not_found("Exercise"));
        }

        let new_workout_exercise = NewWorkoutExercise::from_slice(body)?;
        let workout_exercise =
            Self::insert(&mut tx, workout_id, exercise_id, &new_workout_exercise).await?;

        tx.commit().await?;

        info!(
            "Added exercise {} to workout {} as workout exercise {}",
            exercise_id, workout_id, workout_exercise.id
        );
        Ok(workout_exercise)
    }

    /// Insert a prescription on an open connection, re-running its field checks
    pub async fn insert(
        conn: &mut SqliteConnection,
        workout_id: i64,
        exercise_id: i64,
        new_workout_exercise: &NewWorkoutExercise,
    ) -> ApiResult<WorkoutExercise> {
        new_workout_exercise.validate()?;

        let workout_exercise = sqlx::query_as::<_, WorkoutExercise>(
            r#"
            INSERT INTO workout_exercises (workout_id, exercise_id, reps, sets, duration_seconds)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, workout_id, exercise_id, reps, sets, duration_seconds
            "#,
        )
        .bind(workout_id)
        .bind(exercise_id)
        .bind(new_workout_exercise.reps)
        .bind(new_workout_exercise.sets)
        .bind(new_workout_exercise.duration_seconds)
        .fetch_one(&mut *conn)
        .await?;

        Ok(workout_exercise)
    }
}
