//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{ApplicantView, Job, JobApplication, UserApplicationView};
pub use repository::{ApplicationRepository, JobRepository};
pub use value_objects::{ApplicationStatus, Decision, NewJob};
