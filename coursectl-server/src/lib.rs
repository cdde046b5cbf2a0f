//! coursectl-server: course catalogue and enrollment HTTP service
//!
//! Exposes two document collections (courses, enrollments) over HTTP and
//! provides the enriched per-user enrollment view.
//!
//! - `store`: document store port, Postgres and in-memory adapters
//! - `models`: payload validation at the boundary
//! - `repos`: collection access per resource
//! - `enrich`: the enrollment/course fan-out join
//! - `http`: axum routes, extractors, errors and server lifecycle

pub mod enrich;
pub mod http;
pub mod models;
pub mod repos;
pub mod store;

pub use enrich::{EnrichedEnrollment, EnrollmentEnricher, LookupFailurePolicy};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use store::{DocumentStore, MemoryStore, PgDocumentStore, StoreError};
