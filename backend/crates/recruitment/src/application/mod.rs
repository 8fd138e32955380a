//! Application Layer
//!
//! Use cases for job browsing, applying and admin review.

pub mod admin;
pub mod apply;
pub mod jobs;
pub mod status;

// Re-exports
pub use admin::{
    CreateJobInput, CreateJobUseCase, DashboardUseCase, JobDetailsUseCase, ListAllJobsUseCase,
    ListApplicationsUseCase, ReviewApplicationUseCase, SetJobStatusUseCase,
};
pub use apply::ApplyUseCase;
pub use jobs::{GetJobUseCase, ListJobsUseCase};
pub use status::ListUserApplicationsUseCase;
