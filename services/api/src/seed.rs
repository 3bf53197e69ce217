//! Sample data for a fresh database
//!
//! Everything is written in one transaction through the same insert paths
//! the API uses, so the fixtures pass the same validation as live requests.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::error::ApiResult;
use crate::models::{Category, NewExercise, NewWorkout, NewWorkoutExercise};
use crate::repositories::{ExerciseRepository, WorkoutExerciseRepository, WorkoutRepository};
use crate::validation::ValidationErrors;

/// Row counts written by a seed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub exercises: usize,
    pub workouts: usize,
    pub workout_exercises: usize,
}

const EXERCISES: [(&str, Category, bool); 5] = [
    ("Bench Press", Category::Strength, true),
    ("Squat", Category::Strength, true),
    ("Running", Category::Cardio, false),
    ("Yoga Stretch", Category::Flexibility, false),
    ("Plank", Category::Strength, false),
];

/// ((year, month, day), duration_minutes, notes)
type WorkoutFixture = ((i32, u32, u32), i64, &'static str);

const WORKOUTS: [WorkoutFixture; 3] = [
    ((2024, 1, 15), 60, "Morning strength session"),
    ((2024, 1, 17), 45, "Cardio and flexibility day"),
    ((2024, 1, 19), 30, "Quick lunch workout"),
];

/// (workout index, exercise index, reps, sets, duration_seconds)
const WORKOUT_EXERCISES: [(usize, usize, Option<i64>, Option<i64>, Option<i64>); 6] = [
    (0, 0, Some(10), Some(4), None),
    (0, 1, Some(12), Some(3), None),
    (0, 4, None, Some(3), Some(60)),
    (1, 2, None, None, Some(1800)),
    (1, 3, None, Some(2), Some(120)),
    (2, 1, Some(15), Some(3), None),
];

fn fixture_workouts(fixtures: &[WorkoutFixture]) -> Result<Vec<NewWorkout>, ValidationErrors> {
    fixtures
        .iter()
        .map(|&((year, month, day), duration_minutes, notes)| {
            let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                ValidationErrors::single(
                    "date",
                    format!("{}-{:02}-{:02} is not a calendar day.", year, month, day),
                )
            })?;
            Ok(NewWorkout {
                date,
                duration_minutes,
                notes: Some(notes.to_string()),
            })
        })
        .collect()
}

/// Remove every row, children first
pub async fn clear_tables(conn: &mut SqliteConnection) -> ApiResult<()> {
    sqlx::query("DELETE FROM workout_exercises")
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM workouts").execute(&mut *conn).await?;
    sqlx::query("DELETE FROM exercises").execute(&mut *conn).await?;
    Ok(())
}

/// Replace the database contents with the sample data
pub async fn seed_database(pool: &SqlitePool) -> ApiResult<SeedSummary> {
    let mut tx = pool.begin().await?;

    info!("Clearing tables...");
    clear_tables(&mut tx).await?;

    info!("Seeding exercises...");
    let mut exercise_ids = Vec::with_capacity(EXERCISES.len());
    for (name, category, equipment_needed) in EXERCISES {
        let new_exercise = NewExercise {
            name: name.to_string(),
            category,
            equipment_needed,
        };
        exercise_ids.push(ExerciseRepository::insert(&mut tx, &new_exercise).await?.id);
    }

    info!("Seeding workouts...");
    let mut workout_ids = Vec::with_capacity(WORKOUTS.len());
    for new_workout in fixture_workouts(&WORKOUTS)? {
        workout_ids.push(WorkoutRepository::insert(&mut tx, &new_workout).await?.id);
    }

    info!("Seeding workout exercises...");
    for (workout, exercise, reps, sets, duration_seconds) in WORKOUT_EXERCISES {
        let new_workout_exercise = NewWorkoutExercise {
            reps,
            sets,
            duration_seconds,
        };
        WorkoutExerciseRepository::insert(
            &mut tx,
            workout_ids[workout],
            exercise_ids[exercise],
            &new_workout_exercise,
        )
        .await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        exercises: exercise_ids.len(),
        workouts: workout_ids.len(),
        workout_exercises: WORKOUT_EXERCISES.len(),
    };
    info!("Done seeding! {:?}", summary);
    Ok(summary)
}
