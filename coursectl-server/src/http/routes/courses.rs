//! Course endpoints

use axum::{extract::State, routing::get, Json, Router};

use super::InsertResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{JsonObject, ValidDocumentId};
use crate::http::server::AppState;
use crate::models::NewCourse;
use crate::repos::CourseRepo;
use crate::store::Document;

/// GET /courses - list all courses
async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let courses = CourseRepo::new(state.store()).list().await?;
    Ok(Json(courses))
}

/// GET /courses/{id} - single course, `null` when it does not exist
async fn get_course(
    State(state): State<AppState>,
    ValidDocumentId(id): ValidDocumentId,
) -> Result<Json<Option<Document>>, ApiError> {
    let course = CourseRepo::new(state.store()).get(id).await?;
    Ok(Json(course))
}

/// POST /courses - create a course
async fn create_course(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<InsertResponse>, ApiError> {
    let course = NewCourse::from_json(body)?;
    let id = CourseRepo::new(state.store()).create(course).await?;
    Ok(Json(InsertResponse::from(id)))
}

/// Course routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::enrich::LookupFailurePolicy;
    use crate::models::DocumentId;
    use crate::store::{Collection, MemoryStore};
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(store: Arc<MemoryStore>) -> Router {
        let state = AppState::new(store, LookupFailurePolicy::default());
        router().with_state(state)
    }

    fn post(body: String) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/courses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn course() -> Value {
        json!({
            "title": "Intro to Databases",
            "description": "Documents, indexes and queries",
            "instructor": "Edgar Codd",
            "duration": "5 weeks",
            "price": 35.5,
            "image": "https://img.example.com/db.png"
        })
    }

    #[tokio::test]
    async fn created_course_reads_back_unchanged() {
        let store = Arc::new(MemoryStore::new());
        let app = app(Arc::clone(&store));

        let response = app.clone().oneshot(post(course().to_string())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["acknowledged"], json!(true));
        let id = created["insertedId"].as_str().unwrap().to_owned();

        let response = app
            .clone()
            .oneshot(get(&format!("/courses/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let mut fetched = json_body(response).await;
        assert_eq!(fetched["_id"], json!(id));
        fetched.as_object_mut().unwrap().remove("_id");
        assert_eq!(fetched, course());

        let response = app.oneshot(get("/courses")).await.unwrap();
        let all = json_body(response).await;
        assert_eq!(all.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn each_missing_field_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let app = app(Arc::clone(&store));

        for field in crate::models::COURSE_FIELDS {
            let mut body = course();
            body.as_object_mut().unwrap().remove(field);

            let response = app.clone().oneshot(post(body.to_string())).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{field}");
            let error = json_body(response).await;
            assert_eq!(error["error"], "validation_error");
            assert!(error["message"].as_str().unwrap().contains(field));
        }

        assert_eq!(store.count(Collection::Courses).await, 0);
    }

    #[tokio::test]
    async fn malformed_bodies_are_400() {
        let app = app(Arc::new(MemoryStore::new()));

        let response = app.clone().oneshot(post("{not json".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(post("[1, 2]".into())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = json_body(response).await;
        assert_eq!(error["message"], "request body must be a JSON object");
    }

    #[tokio::test]
    async fn unknown_course_is_null() {
        let app = app(Arc::new(MemoryStore::new()));
        let response = app
            .oneshot(get(&format!("/courses/{}", DocumentId::new())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, Value::Null);
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let app = app(Arc::new(MemoryStore::new()));
        let response = app.oneshot(get("/courses/not-an-id")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
