//! Workout tracker API service
//!
//! REST endpoints over exercises, workouts and the exercises prescribed
//! within each workout.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validation;

pub use state::AppState;
