//! Enrollment repository

use crate::models::{DocumentId, NewEnrollment, EMAIL_FIELD};
use crate::store::{Collection, Document, DocumentStore, Filter, StoreError};

/// Enrollment repository
pub struct EnrollmentRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> EnrollmentRepo<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, enrollment: NewEnrollment) -> Result<DocumentId, StoreError> {
        let email = enrollment.email().clone();
        let id = self
            .store
            .insert(Collection::Enrolls, enrollment.into_body())
            .await?;
        tracing::info!(%id, %email, "enrollment created");
        Ok(id)
    }

    /// List enrollments, restricted to one email (exact match) when given.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Document>, StoreError> {
        let filter = match email {
            Some(email) => Filter::field_eq(EMAIL_FIELD, email),
            None => Filter::all(),
        };
        self.store.find(Collection::Enrolls, &filter).await
    }
}
