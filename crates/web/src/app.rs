use axum::{Router, routing::get};
use storage::repository::SharedStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::exercises;

#[derive(OpenApi)]
#[openapi(
    paths(
        exercises::handlers::list_exercises,
        exercises::handlers::add_exercise,
        exercises::handlers::get_exercise,
        exercises::handlers::delete_exercise,
        exercises::handlers::update_exercise,
    ),
    components(
        schemas(
            storage::models::Exercise,
            storage::dto::exercise::ExerciseRequest,
            storage::dto::exercise::DurationInput,
        )
    ),
    tags(
        (name = "exercises", description = "Exercise log endpoints"),
    )
)]
pub struct ApiDoc;

/// Build the application router around an already constructed store.
pub fn build_router(store: SharedStore) -> Router {
    Router::new()
        .route("/exercises/", get(exercises::handlers::list_exercises))
        .nest("/exercises", exercises::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use storage::repository::InMemoryExerciseStore;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(Arc::new(InMemoryExerciseStore::new()))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn run_payload() -> Value {
        json!({
            "username": "A",
            "description": "run",
            "duration": "30",
            "date": "2024-01-01"
        })
    }

    async fn add_and_fetch_id(app: &Router, payload: Value) -> String {
        let (status, body) = send(app, Method::POST, "/exercises/add", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Exercise added!"));

        let (_, list) = send(app, Method::GET, "/exercises", None).await;
        list.as_array().unwrap().last().unwrap()["_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_add_then_list_includes_coerced_record() {
        let app = app();

        let (_, before) = send(&app, Method::GET, "/exercises", None).await;
        assert_eq!(before, json!([]));

        add_and_fetch_id(&app, run_payload()).await;

        let (status, list) = send(&app, Method::GET, "/exercises", None).await;
        assert_eq!(status, StatusCode::OK);
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["username"], "A");
        assert_eq!(list[0]["description"], "run");
        assert_eq!(list[0]["duration"], 30.0);
        assert_eq!(list[0]["date"], "2024-01-01T00:00:00Z");
        assert!(list[0]["createdAt"].is_string());
        assert!(list[0]["updatedAt"].is_string());
    }

    #[tokio::test]
    async fn test_get_by_id_returns_inserted_fields() {
        let app = app();
        let id = add_and_fetch_id(&app, run_payload()).await;

        let (status, exercise) = send(&app, Method::GET, &format!("/exercises/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exercise["_id"], id.as_str());
        assert_eq!(exercise["username"], "A");
        assert_eq!(exercise["duration"], 30.0);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let app = app();
        let id = add_and_fetch_id(&app, run_payload()).await;

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/exercises/update/{id}"),
            Some(json!({
                "username": "B",
                "description": "swim",
                "duration": 45,
                "date": "2024-02-03T07:15:00Z"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Exercise updated!"));

        let (_, exercise) = send(&app, Method::GET, &format!("/exercises/{id}"), None).await;
        assert_eq!(exercise["username"], "B");
        assert_eq!(exercise["description"], "swim");
        assert_eq!(exercise["duration"], 45.0);
        assert_eq!(exercise["date"], "2024-02-03T07:15:00Z");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let app = app();
        let id = add_and_fetch_id(&app, run_payload()).await;

        let (status, body) = send(&app, Method::DELETE, &format!("/exercises/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("Exercise deleted."));

        let (status, body) = send(&app, Method::GET, &format!("/exercises/{id}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!("Error: Exercise not found"));

        let (_, list) = send(&app, Method::GET, "/exercises", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_non_numeric_duration_is_rejected() {
        let app = app();
        let mut payload = run_payload();
        payload["duration"] = json!("thirty");

        let (status, body) = send(&app, Method::POST, "/exercises/add", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body.as_str().unwrap();
        assert!(message.starts_with("Error: Exercise validation failed"));
        assert!(message.contains("duration"));

        let (_, list) = send(&app, Method::GET, "/exercises", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_unparsable_date_is_rejected() {
        let app = app();
        let mut payload = run_payload();
        payload["date"] = json!("someday");

        let (status, body) = send(&app, Method::POST, "/exercises/add", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_str().unwrap().contains("date"));
    }

    #[tokio::test]
    async fn test_missing_fields_are_rejected() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/exercises/add",
            Some(json!({ "username": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body.as_str().unwrap();
        assert!(message.contains("description"));
        assert!(message.contains("duration"));
        assert!(message.contains("date"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_flattened_to_bad_request() {
        let app = app();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/exercises/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: String = serde_json::from_slice(&bytes).unwrap();
        assert!(body.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_list_accepts_trailing_slash() {
        let app = app();
        add_and_fetch_id(&app, run_payload()).await;

        let (status, list) = send(&app, Method::GET, "/exercises/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["username"], "A");
    }

    #[tokio::test]
    async fn test_undecodable_id_is_reported_as_json_error() {
        let app = app();

        for method in [Method::GET, Method::DELETE] {
            let (status, body) = send(&app, method, "/exercises/%FF", None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.as_str().unwrap().starts_with("Error: "));
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/exercises/update/%FF",
            Some(run_payload()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_str().unwrap().starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/exercises/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!("Error: Invalid exercise id: not-an-id"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let app = app();
        let id = uuid::Uuid::new_v4();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/exercises/update/{id}"),
            Some(run_payload()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!("Error: Exercise not found"));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = app();
        let request = Request::builder()
            .uri("/exercises")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_exercise_paths() {
        let app = app();

        let (status, doc) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        for path in [
            "/exercises",
            "/exercises/add",
            "/exercises/{id}",
            "/exercises/update/{id}",
        ] {
            assert!(doc["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
