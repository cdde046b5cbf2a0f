//! Enrollment endpoints, including the enriched `/my-enrolls` view

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::InsertResponse;
use crate::enrich::{EnrichedEnrollment, EnrollmentEnricher};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonObject, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Email, NewEnrollment, ValidationError};
use crate::repos::EnrollmentRepo;
use crate::store::Document;

/// `?email=` query parameter
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    /// The email, treating an empty value as absent.
    fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// POST /enrolls - create an enrollment
async fn create_enroll(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<Json<InsertResponse>, ApiError> {
    let enrollment = NewEnrollment::from_json(body)?;
    let id = EnrollmentRepo::new(state.store()).create(enrollment).await?;
    Ok(Json(InsertResponse::from(id)))
}

/// GET /enrolls - list enrollments, filtered by email when given
async fn list_enrolls(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<EmailQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    let enrollments = EnrollmentRepo::new(state.store())
        .list(params.email())
        .await?;
    Ok(Json(enrollments))
}

/// GET /my-enrolls - a user's enrollments with course details
async fn my_enrolls(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<EmailQuery>,
) -> Result<Json<Vec<EnrichedEnrollment>>, ApiError> {
    let email = params.email().ok_or(ValidationError::Missing {
        fields: vec!["email"],
    })?;
    let email = Email::new(email)?;

    let enriched = EnrollmentEnricher::new(state.store(), state.lookup_policy)
        .enrich_for(&email)
        .await?;
    Ok(Json(enriched))
}

/// Enrollment routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/enrolls", get(list_enrolls).post(create_enroll))
        .route("/my-enrolls", get(my_enrolls))
}
