//! Application state shared across handlers

use sqlx::SqlitePool;

use crate::repositories::{ExerciseRepository, WorkoutExerciseRepository, WorkoutRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub exercise_repository: ExerciseRepository,
    pub workout_repository: WorkoutRepository,
    pub workout_exercise_repository: WorkoutExerciseRepository,
}

impl AppState {
    /// Build every repository over the same pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            exercise_repository: ExerciseRepository::new(pool.clone()),
            workout_repository: WorkoutRepository::new(pool.clone()),
            workout_exercise_repository: WorkoutExerciseRepository::new(pool.clone()),
            db_pool: pool,
        }
    }
}
