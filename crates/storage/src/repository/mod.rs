use std::sync::Arc;

use uuid::Uuid;

use crate::dto::exercise::ExerciseFields;
use crate::error::{Result, StorageError};
use crate::models::Exercise;

pub mod exercise;
pub mod memory;

pub use exercise::PgExerciseRepository;
pub use memory::InMemoryExerciseStore;

/// Persistence contract for exercise records.
#[async_trait::async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Store a new exercise; the store assigns the id and timestamps.
    async fn insert(&self, fields: &ExerciseFields) -> Result<Exercise>;

    /// All exercises in insertion order.
    async fn get_all(&self) -> Result<Vec<Exercise>>;

    async fn get_by_id(&self, id: Uuid) -> Result<Exercise>;

    /// Overwrite all user fields of an existing exercise.
    async fn update_by_id(&self, id: Uuid, fields: &ExerciseFields) -> Result<Exercise>;

    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}

/// Store handle shared by request handlers.
pub type SharedStore = Arc<dyn ExerciseStore>;

/// Parse an exercise id taken from a URL path.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StorageError::InvalidId(raw.to_string()))
}
