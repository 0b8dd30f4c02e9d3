use axum::{
    Router,
    routing::{get, post},
};
use storage::repository::SharedStore;

use super::handlers::{
    add_exercise, delete_exercise, get_exercise, list_exercises, update_exercise,
};

pub fn routes() -> Router<SharedStore> {
    Router::new()
        .route("/", get(list_exercises))
        .route("/add", post(add_exercise))
        .route("/:id", get(get_exercise).delete(delete_exercise))
        .route("/update/:id", post(update_exercise))
}
