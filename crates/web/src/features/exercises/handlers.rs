use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use storage::{dto::exercise::ExerciseRequest, models::Exercise, repository::SharedStore};

use crate::error::WebResult;

use super::services;

#[utoipa::path(
    get,
    path = "/exercises",
    responses(
        (status = 200, description = "List all exercises", body = Vec<Exercise>),
        (status = 400, description = "Store failure", body = String)
    ),
    tag = "exercises"
)]
pub async fn list_exercises(State(store): State<SharedStore>) -> WebResult<Response> {
    let exercises = services::list_exercises(store.as_ref()).await?;

    Ok(Json(exercises).into_response())
}

#[utoipa::path(
    post,
    path = "/exercises/add",
    request_body = ExerciseRequest,
    responses(
        (status = 200, description = "Exercise added", body = String),
        (status = 400, description = "Validation error or store failure", body = String)
    ),
    tag = "exercises"
)]
pub async fn add_exercise(
    State(store): State<SharedStore>,
    payload: Result<Json<ExerciseRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Json(req) = payload?;

    let exercise = services::add_exercise(store.as_ref(), &req).await?;
    tracing::info!(exercise_id = %exercise.id, username = %exercise.username, "Exercise added");

    Ok(Json("Exercise added!").into_response())
}

#[utoipa::path(
    get,
    path = "/exercises/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    responses(
        (status = 200, description = "Exercise found", body = Exercise),
        (status = 400, description = "Malformed id, exercise not found or store failure", body = String)
    ),
    tag = "exercises"
)]
pub async fn get_exercise(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> WebResult<Response> {
    let Path(id) = path?;
    let exercise = services::get_exercise(store.as_ref(), &id).await?;

    Ok(Json(exercise).into_response())
}

#[utoipa::path(
    delete,
    path = "/exercises/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    responses(
        (status = 200, description = "Exercise deleted", body = String),
        (status = 400, description = "Malformed id, exercise not found or store failure", body = String)
    ),
    tag = "exercises"
)]
pub async fn delete_exercise(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
) -> WebResult<Response> {
    let Path(id) = path?;
    services::delete_exercise(store.as_ref(), &id).await?;
    tracing::info!(exercise_id = %id, "Exercise deleted");

    Ok(Json("Exercise deleted.").into_response())
}

#[utoipa::path(
    post,
    path = "/exercises/update/{id}",
    params(
        ("id" = String, Path, description = "Exercise id")
    ),
    request_body = ExerciseRequest,
    responses(
        (status = 200, description = "Exercise updated", body = String),
        (status = 400, description = "Validation error, exercise not found or store failure", body = String)
    ),
    tag = "exercises"
)]
pub async fn update_exercise(
    State(store): State<SharedStore>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ExerciseRequest>, JsonRejection>,
) -> WebResult<Response> {
    let Path(id) = path?;
    let Json(req) = payload?;

    let exercise = services::update_exercise(store.as_ref(), &id, &req).await?;
    tracing::info!(exercise_id = %exercise.id, "Exercise updated");

    Ok(Json("Exercise updated!").into_response())
}
