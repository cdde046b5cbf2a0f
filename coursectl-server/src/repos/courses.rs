//! Course repository
//!
//! - list: every course, natural store order
//! - get: by identifier, `None` when absent
//! - create: insert a validated payload

use crate::models::{DocumentId, NewCourse};
use crate::store::{Collection, Document, DocumentStore, Filter, StoreError};

/// Course repository
pub struct CourseRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> CourseRepo<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Document>, StoreError> {
        self.store.find(Collection::Courses, &Filter::all()).await
    }

    pub async fn get(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        self.store.find_by_id(Collection::Courses, id).await
    }

    pub async fn create(&self, course: NewCourse) -> Result<DocumentId, StoreError> {
        let title = course.title().to_owned();
        let id = self
            .store
            .insert(Collection::Courses, course.into_body())
            .await?;
        tracing::info!(%id, %title, "course created");
        Ok(id)
    }
}
