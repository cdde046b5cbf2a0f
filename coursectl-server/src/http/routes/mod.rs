//! Route handlers organized by resource

pub mod courses;
pub mod enrolls;
pub mod health;

use serde::Serialize;

use crate::models::DocumentId;

/// Insert result returned by the create endpoints
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    pub acknowledged: bool,
    pub inserted_id: DocumentId,
}

impl From<DocumentId> for InsertResponse {
    fn from(id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id,
        }
    }
}
