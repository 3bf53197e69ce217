//! Repositories for database operations
//!
//! Every write runs inside one transaction. A transaction that is dropped
//! before `commit` rolls back, so an early return through `?` never leaves a
//! partial write behind.

use sqlx::SqliteConnection;

use crate::error::ApiResult;
use crate::models::{Exercise, Workout};

pub mod exercise;
pub mod workout;
pub mod workout_exercise;

pub use exercise::ExerciseRepository;
pub use workout::WorkoutRepository;
pub use workout_exercise::WorkoutExerciseRepository;

/// Look up an exercise on an already acquired connection
pub(crate) async fn fetch_exercise(
    conn: &mut SqliteConnection,
    id: i64,
) -> ApiResult<Option<Exercise>> {
    let exercise = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, category, equipment_needed
        FROM exercises
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(exercise)
}

/// Look up a workout on an already acquired connection
pub(crate) async fn fetch_workout(
    conn: &mut SqliteConnection,
    id: i64,
) -> ApiResult<Option<Workout>> {
    let workout = sqlx::query_as::<_, Workout>(
        r#"
        SELECT id, date, duration_minutes, notes
        FROM workouts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(workout)
}
