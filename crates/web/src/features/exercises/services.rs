use storage::{
    dto::exercise::ExerciseRequest,
    error::Result,
    models::Exercise,
    repository::{ExerciseStore, parse_id},
};

/// List all exercises
pub async fn list_exercises(store: &dyn ExerciseStore) -> Result<Vec<Exercise>> {
    store.get_all().await
}

/// Get exercise by id
pub async fn get_exercise(store: &dyn ExerciseStore, id: &str) -> Result<Exercise> {
    let id = parse_id(id)?;
    store.get_by_id(id).await
}

/// Validate and store a new exercise
pub async fn add_exercise(store: &dyn ExerciseStore, request: &ExerciseRequest) -> Result<Exercise> {
    let fields = request.parse()?;
    store.insert(&fields).await
}

/// Overwrite an exercise with the validated request fields
pub async fn update_exercise(
    store: &dyn ExerciseStore,
    id: &str,
    request: &ExerciseRequest,
) -> Result<Exercise> {
    let id = parse_id(id)?;
    let fields = request.parse()?;
    store.update_by_id(id, &fields).await
}

/// Delete an exercise
pub async fn delete_exercise(store: &dyn ExerciseStore, id: &str) -> Result<()> {
    let id = parse_id(id)?;
    store.delete_by_id(id).await
}
