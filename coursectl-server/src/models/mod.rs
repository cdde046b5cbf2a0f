//! Domain models with validation at construction
//!
//! Client payloads are checked here before anything reaches the store.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod id;
pub mod email;
pub mod course;
pub mod enrollment;

pub use validation::ValidationError;
pub use id::DocumentId;
pub use email::Email;
pub use course::{NewCourse, COURSE_FIELDS};
pub use enrollment::{NewEnrollment, COURSE_ID_FIELD, EMAIL_FIELD};
