//! Repository Traits
//!
//! Job Store interfaces. Implementation is in infrastructure layer.

use kernel::id::{ApplicationId, JobId, UserId};

use crate::domain::entities::{
    ApplicationCounts, Job, JobApplication, JobCounts, UserApplicationView,
};
use crate::domain::value_objects::{ApplicationStatus, NewJob};
use crate::error::RecruitmentResult;

/// Job postings
#[trait_variant::make(JobRepository: Send)]
pub trait LocalJobRepository {
    /// Insert an open posting; the store assigns the id
    async fn create_job(&self, job: &NewJob) -> RecruitmentResult<Job>;

    async fn find_job(&self, job_id: JobId) -> RecruitmentResult<Option<Job>>;

    /// Newest first
    async fn list_jobs(&self, open_only: bool) -> RecruitmentResult<Vec<Job>>;

    /// Returns the updated posting, `None` if it does not exist
    async fn set_job_open(&self, job_id: JobId, is_open: bool) -> RecruitmentResult<Option<Job>>;

    async fn count_jobs(&self) -> RecruitmentResult<JobCounts>;
}

/// Job applications
#[trait_variant::make(ApplicationRepository: Send)]
pub trait LocalApplicationRepository {
    /// Insert a `Pending` application
    ///
    /// `(job_id, user_id)` is unique; a second insert fails with
    /// `RecruitmentError::DuplicateApplication` even under concurrency.
    async fn create_application(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> RecruitmentResult<JobApplication>;

    async fn find_application(
        &self,
        application_id: ApplicationId,
    ) -> RecruitmentResult<Option<JobApplication>>;

    /// Oldest first
    async fn list_applications_by_job(&self, job_id: JobId) -> RecruitmentResult<Vec<JobApplication>>;

    /// Newest first, joined with job titles
    async fn list_applications_by_user(
        &self,
        user_id: UserId,
    ) -> RecruitmentResult<Vec<UserApplicationView>>;

    /// Move a `Pending` application to `status` in one atomic step
    ///
    /// Fails with `ApplicationNotFound` or `AlreadyDecided`; a decided
    /// application is never overwritten.
    async fn decide_application(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> RecruitmentResult<JobApplication>;

    /// Counts for one job, or across all jobs when `job_id` is `None`
    async fn count_applications(&self, job_id: Option<JobId>) -> RecruitmentResult<ApplicationCounts>;
}
