//! Recruitment Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Rules
//! - A user applies to a job at most once; the store enforces it
//! - Closed jobs accept no applications
//! - An application leaves `pending` exactly once (approve or reject)
//! - Admin routes are guarded by the bearer and admin middleware from `auth`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{RecruitmentError, RecruitmentResult};
pub use infra::{InMemoryRecruitmentRepository, PgRecruitmentRepository};
pub use presentation::RecruitmentAppState;
pub use presentation::router::{admin_router, application_status_router, recruitment_router};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
