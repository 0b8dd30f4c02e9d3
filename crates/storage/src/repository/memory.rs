use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ExerciseStore;
use crate::dto::exercise::ExerciseFields;
use crate::error::{Result, StorageError};
use crate::models::Exercise;

/// Process-local exercise store. Records live for the lifetime of the value.
#[derive(Default)]
pub struct InMemoryExerciseStore {
    exercises: RwLock<Vec<Exercise>>,
}

impl InMemoryExerciseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ExerciseStore for InMemoryExerciseStore {
    async fn insert(&self, fields: &ExerciseFields) -> Result<Exercise> {
        let now = Utc::now();
        let exercise = Exercise {
            id: Uuid::new_v4(),
            username: fields.username.clone(),
            description: fields.description.clone(),
            duration: fields.duration,
            date: fields.date,
            created_at: now,
            updated_at: now,
        };

        self.exercises.write().await.push(exercise.clone());
        Ok(exercise)
    }

    async fn get_all(&self) -> Result<Vec<Exercise>> {
        Ok(self.exercises.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Exercise> {
        self.exercises
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn update_by_id(&self, id: Uuid, fields: &ExerciseFields) -> Result<Exercise> {
        let mut exercises = self.exercises.write().await;
        let exercise = exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StorageError::NotFound)?;

        exercise.username = fields.username.clone();
        exercise.description = fields.description.clone();
        exercise.duration = fields.duration;
        exercise.date = fields.date;
        exercise.updated_at = Utc::now();

        Ok(exercise.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        let mut exercises = self.exercises.write().await;
        let before = exercises.len();
        exercises.retain(|e| e.id != id);

        if exercises.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
