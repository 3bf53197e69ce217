//! Workout models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::{Exercise, WorkoutExercise};
use crate::validation::{Payload, ValidationErrors, validate_duration_minutes};

/// Workout entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: i64,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

/// Workout together with the exercises it prescribes
///
/// Computed on read; neither collection is ever written through this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
    pub workout_exercises: Vec<WorkoutExercise>,
}

impl WorkoutDetail {
    /// A workout with nothing attached yet
    pub fn bare(workout: Workout) -> Self {
        Self {
            workout,
            exercises: Vec::new(),
            workout_exercises: Vec::new(),
        }
    }
}

/// New workout creation payload
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}

impl NewWorkout {
    pub const FIELDS: [&'static str; 3] = ["date", "duration_minutes", "notes"];

    /// Read and validate a creation request body
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut payload = Payload::new(body)?;

        let date = payload.required_date("date");
        let duration_minutes = payload.required_integer("duration_minutes");
        if let Some(duration_minutes) = duration_minutes {
            payload
                .errors_mut()
                .check("duration_minutes", validate_duration_minutes(duration_minutes));
        }
        let notes = payload.optional_string("notes");

        let errors = payload.finish(&Self::FIELDS);
        match (date, duration_minutes) {
            (Some(date), Some(duration_minutes)) if errors.is_empty() => Ok(Self {
                date,
                duration_minutes,
                notes,
            }),
            _ => Err(errors),
        }
    }

    /// Field checks run right before the row is written
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(
            "duration_minutes",
            validate_duration_minutes(self.duration_minutes),
        );
        errors.into_result(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_workout_from_valid_json() {
        let workout = NewWorkout::from_json(&json!({
            "date": "2024-01-15",
            "duration_minutes": 1,
        }))
        .unwrap();

        assert_eq!(workout.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(workout.duration_minutes, 1);
        assert_eq!(workout.notes, None);
    }

    #[test]
    fn test_new_workout_rejects_non_positive_duration() {
        for duration in [0, -10] {
            let errors = NewWorkout::from_json(&json!({
                "date": "2024-01-15",
                "duration_minutes": duration,
            }))
            .unwrap_err();
            assert_eq!(
                errors.get("duration_minutes"),
                Some(&["Duration must be a positive integer.".to_string()][..])
            );
        }
    }

    #[test]
    fn test_new_workout_requires_date() {
        let errors = NewWorkout::from_json(&json!({
            "date": null,
            "duration_minutes": 30,
            "notes": "rest day walk",
        }))
        .unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["date"]);
    }

    #[test]
    fn test_detail_flattens_workout_fields() {
        let detail = WorkoutDetail::bare(Workout {
            id: 7,
            date: NaiveDate::from_ymd_opt(2024, 1, 19).unwrap(),
            duration_minutes: 30,
            notes: None,
        });

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "id": 7,
                "date": "2024-01-19",
                "duration_minutes": 30,
                "notes": null,
                "exercises": [],
                "workout_exercises": [],
            })
        );
    }
}
