//! Repository implementations over the document store
//!
//! Each repository borrows the shared store handle for the duration of a
//! request and maps domain types onto collection operations.

pub mod courses;
pub mod enrollments;

pub use courses::CourseRepo;
pub use enrollments::EnrollmentRepo;
