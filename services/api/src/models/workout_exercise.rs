//! Workout exercise models

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{
    Payload, ValidationErrors, parse_json, validate_duration_seconds, validate_reps,
    validate_sets,
};

/// How one exercise is performed within one workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct WorkoutExercise {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub duration_seconds: Option<i64>,
}

/// Prescription attributes accepted in the request body
///
/// The workout and exercise ids come from the request path, never the body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewWorkoutExercise {
    pub reps: Option<i64>,
    pub sets: Option<i64>,
    pub duration_seconds: Option<i64>,
}

impl NewWorkoutExercise {
    pub const FIELDS: [&'static str; 3] = ["reps", "sets", "duration_seconds"];

    /// Read and validate a creation request body
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut payload = Payload::new(body)?;

        let reps = payload.optional_integer("reps");
        let sets = payload.optional_integer("sets");
        let duration_seconds = payload.optional_integer("duration_seconds");

        let new = Self {
            reps,
            sets,
            duration_seconds,
        };
        let errors = payload.errors_mut();
        errors.check("reps", validate_reps(new.reps));
        errors.check("sets", validate_sets(new.sets));
        errors.check("duration_seconds", validate_duration_seconds(new.duration_seconds));

        payload.finish(&Self::FIELDS).into_result(new)
    }

    /// Parse a raw request body, then read it as with `from_json`
    pub fn from_slice(body: &[u8]) -> Result<Self, ValidationErrors> {
        Self::from_json(&parse_json(body)?)
    }

    /// Field checks run right before the row is written
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check("reps", validate_reps(self.reps));
        errors.check("sets", validate_sets(self.sets));
        errors.check(
            "duration_seconds",
            validate_duration_seconds(self.duration_seconds),
        );
        errors.into_result(())
    }
}
