//! Workout repository for database operations

use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::fetch_workout;
use crate::error::ApiResult;
use crate::models::{Exercise, NewWorkout, Workout, WorkoutDetail, WorkoutExercise};

/// Workout repository for database operations
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: SqlitePool,
}

impl WorkoutRepository {
    /// Create a new workout repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all workouts with their exercises
    pub async fn list(&self) -> ApiResult<Vec<WorkoutDetail>> {
        let mut conn = self.pool.acquire().await?;

        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, date, duration_minutes, notes
            FROM workouts
            ORDER BY id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut details = Vec::with_capacity(workouts.len());
        for workout in workouts {
            details.push(load_detail(&mut conn, workout).await?);
        }

        Ok(details)
    }

    /// Find a workout by ID, with its exercises
    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<WorkoutDetail>> {
        let mut conn = self.pool.acquire().await?;

        match fetch_workout(&mut conn, id).await? {
            Some(workout) => Ok(Some(load_detail(&mut conn, workout).await?)),
            None => Ok(None),
        }
    }

    /// Create a new workout
    pub async fn create(&self, new_workout: &NewWorkout) -> ApiResult<WorkoutDetail> {
        let mut tx = self.pool.begin().await?;
        let workout = Self::insert(&mut tx, new_workout).await?;
        tx.commit().await?;

        info!("Created workout {} on {}", workout.id, workout.date);
        Ok(WorkoutDetail::bare(workout))
    }

    /// Insert a workout on an open connection, re-running its field checks
    pub async fn insert(
        conn: &mut SqliteConnection,
        new_workout: &NewWorkout,
    ) -> ApiResult<Workout> {
        new_workout.validate()?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (date, duration_minutes, notes)
            VALUES (?, ?, ?)
            RETURNING id, date, duration_minutes, notes
            "#,
        )
        .bind(new_workout.date)
        .bind(new_workout.duration_minutes)
        .bind(&new_workout.notes)
        .fetch_one(&mut *conn)
        .await?;

        Ok(workout)
    }

    /// Delete a workout and every workout exercise it owns
    ///
    /// Returns `false` when no workout has the given ID.
    pub async fn delete(&self, id: i64) -> ApiResult<bool> {
        let mut tx = self.pool.begin().await?;

        if fetch_workout(&mut tx, id).await?.is_none() {
            return Ok(false);
        }

        let detached = sqlx::query("DELETE FROM workout_exercises WHERE workout_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!("Deleted workout {} and {} workout exercises", id, detached);
        Ok(true)
    }
}

async fn load_detail(conn: &mut SqliteConnection, workout: Workout) -> ApiResult<WorkoutDetail> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT DISTINCT e.id, e.name, e.category, e.equipment_needed
        FROM exercises e
        JOIN workout_exercises we ON we.exercise_id = e.id
        WHERE we.workout_id = ?
        ORDER BY e.id
        "#,
    )
    .bind(workout.id)
    .fetch_all(&mut *conn)
    .await?;

    let workout_exercises = sqlx::query_as::<_, WorkoutExercise>(
        r#"
        SELECT id, workout_id, exercise_id, reps, sets, duration_seconds
        FROM workout_exercises
        WHERE workout_id = ?
        ORDER BY id
        "#,
    )
    .bind(workout.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(WorkoutDetail {
        workout,
        exercises,
        workout_exercises,
    })
}
