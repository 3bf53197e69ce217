//! API models for request and response payloads

pub mod exercise;
pub mod workout;
pub mod workout_exercise;

pub use exercise::{Category, Exercise, NewExercise};
pub use workout::{NewWorkout, Workout, WorkoutDetail};
pub use workout_exercise::{NewWorkoutExercise, WorkoutExercise};
