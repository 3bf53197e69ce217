//! API service routes

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use common::database;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use crate::{
    error::{ApiError, ApiResult},
    models::{NewExercise, NewWorkout},
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/workouts", get(get_workouts).post(create_workout))
        .route("/workouts/:id", get(get_workout).delete(delete_workout))
        .route("/exercises", get(get_exercises).post(create_exercise))
        .route("/exercises/:id", get(get_exercise).delete(delete_exercise))
        .route(
            "/workouts/:workout_id/exercises/:exercise_id/workout_exercises",
            post(create_workout_exercise),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint, answering only once the database responds
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    database::health_check(&state.db_pool).await?;

    Ok(Json(json!({
        "status": "ok",
        "service": "workout-api"
    })))
}

/// Get all workouts
pub async fn get_workouts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let workouts = state.workout_repository.list().await?;

    Ok(Json(workouts))
}

/// Get a workout by ID
pub async fn get_workout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let workout = state
        .workout_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Workout"))?;

    Ok(Json(workout))
}

/// Create a new workout
pub async fn create_workout(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_workout = NewWorkout::from_json(&body)?;
    let workout = state.workout_repository.create(&new_workout).await?;

    Ok((StatusCode::CREATED, Json(workout)))
}

/// Delete a workout along with its workout exercises
pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if state.workout_repository.delete(id).await? {
        Ok(Json(json!({ "message": format!("Workout {} deleted successfully", id) })))
    } else {
        Err(ApiError::not_found("Workout"))
    }
}

/// Get all exercises
pub async fn get_exercises(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let exercises = state.exercise_repository.list().await?;

    Ok(Json(exercises))
}

/// Get an exercise by ID
pub async fn get_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let exercise = state
        .exercise_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Exercise"))?;

    Ok(Json(exercise))
}

/// Create a new exercise
pub async fn create_exercise(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<Value>, ApiError>,
) -> ApiResult<impl IntoResponse> {
    let new_exercise = NewExercise::from_json(&body)?;
    let exercise = state.exercise_repository.create(&new_exercise).await?;

    Ok((StatusCode::CREATED, Json(exercise)))
}

/// Delete an exercise along with its workout exercises
pub async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    if state.exercise_repository.delete(id).await? {
        Ok(Json(json!({ "message": format!("Exercise {} deleted successfully", id) })))
    } else {
        Err(ApiError::not_found("Exercise"))
    }
}

/// Add an exercise to a workout
///
/// The body is taken raw so it is only parsed once both parents are known to
/// exist.
pub async fn create_workout_exercise(
    State(state): State<AppState>,
    Path((workout_id, exercise_id)): Path<(i64, i64)>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let workout_exercise = state
        .workout_exercise_repository
        .create(workout_id, exercise_id, &body)
        .await?;

    Ok((StatusCode::CREATED, Json(workout_exercise)))
}
