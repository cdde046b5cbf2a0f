//! Enrollment enrichment join
//!
//! Fetch a user's enrollments, then fetch each referenced course
//! concurrently and copy six course fields onto the enrollment.
//! Lookups are not batched or deduplicated; output order follows the
//! enrollment query.

use std::fmt;
use std::str::FromStr;

use futures::future::try_join_all;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{DocumentId, Email, COURSE_ID_FIELD};
use crate::repos::{CourseRepo, EnrollmentRepo};
use crate::store::{Document, DocumentStore, StoreError};

/// Course field → key on the enriched enrollment
pub const ENRICHMENT_FIELDS: [(&str, &str); 6] = [
    ("title", "courseTitle"),
    ("description", "courseDescription"),
    ("instructor", "instructor"),
    ("duration", "duration"),
    ("price", "price"),
    ("image", "courseImage"),
];

/// What a store error inside a single course lookup does to the join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupFailurePolicy {
    /// Abort the whole join with the error
    #[default]
    FailRequest,
    /// Log and render that record as if the course were missing
    Degrade,
}

impl LookupFailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FailRequest => "fail-request",
            Self::Degrade => "degrade",
        }
    }
}

impl FromStr for LookupFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-request" | "fail" => Ok(Self::FailRequest),
            "degrade" => Ok(Self::Degrade),
            other => Err(format!(
                "unknown lookup failure policy '{other}' (expected fail-request or degrade)"
            )),
        }
    }
}

impl fmt::Display for LookupFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enrollment with course details merged in (view, never stored)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedEnrollment(Map<String, Value>);

impl EnrichedEnrollment {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// Merge course fields onto an enrollment.
///
/// Every enrichment key is overwritten when the course has the field and
/// removed otherwise, so a missing course leaves the keys absent.
pub fn merge_course(enrollment: Document, course: Option<&Document>) -> EnrichedEnrollment {
    let mut merged = enrollment.into_json();
    for (source, target) in ENRICHMENT_FIELDS {
        match course.and_then(|c| c.get(source)) {
            Some(value) => {
                merged.insert(target.to_owned(), value.clone());
            }
            None => {
                merged.remove(target);
            }
        }
    }
    EnrichedEnrollment(merged)
}

/// Course identifier referenced by an enrollment, if it can name one.
fn course_reference(enrollment: &Document) -> Option<DocumentId> {
    enrollment
        .get(COURSE_ID_FIELD)
        .and_then(Value::as_str)
        .and_then(|raw| DocumentId::parse(raw).ok())
}

/// Runs the join against an injected store
pub struct EnrollmentEnricher<'a> {
    store: &'a dyn DocumentStore,
    policy: LookupFailurePolicy,
}

impl<'a> EnrollmentEnricher<'a> {
    pub fn new(store: &'a dyn DocumentStore, policy: LookupFailurePolicy) -> Self {
        Self { store, policy }
    }

    /// Enriched enrollments for `email`, one per stored enrollment.
    pub async fn enrich_for(&self, email: &Email) -> Result<Vec<EnrichedEnrollment>, StoreError> {
        let enrollments = EnrollmentRepo::new(self.store)
            .list(Some(email.as_str()))
            .await?;
        let total = enrollments.len();

        let enriched = try_join_all(enrollments.into_iter().map(|e| self.enrich_one(e))).await?;

        tracing::debug!(
            %email,
            enrollments = total,
            with_course = enriched.iter().filter(|e| e.get("courseTitle").is_some()).count(),
            "enrollments enriched"
        );
        Ok(enriched)
    }

    async fn enrich_one(&self, enrollment: Document) -> Result<EnrichedEnrollment, StoreError> {
        let Some(course_id) = course_reference(&enrollment) else {
            tracing::debug!(enrollment = %enrollment.id, "enrollment has no usable courseId");
            return Ok(merge_course(enrollment, None));
        };

        let course = match CourseRepo::new(self.store).get(course_id).await {
            Ok(course) => course,
            Err(err) => match self.policy {
                LookupFailurePolicy::FailRequest => return Err(err),
                LookupFailurePolicy::Degrade => {
                    tracing::warn!(
                        enrollment = %enrollment.id,
                        course = %course_id,
                        error = %err,
                        "course lookup failed, returning enrollment without course details"
                    );
                    None
                }
            },
        };

        Ok(merge_course(enrollment, course.as_ref()))
    }
}
