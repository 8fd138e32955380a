//! Job Browsing Use Cases

use std::sync::Arc;

use kernel::id::JobId;

use crate::domain::entities::Job;
use crate::domain::repository::JobRepository;
use crate::error::{RecruitmentError, RecruitmentResult};

/// Public listing: open postings only
pub struct ListJobsUseCase<R>
where
    R: JobRepository,
{
    repo: Arc<R>,
}

impl<R> ListJobsUseCase<R>
where
    R: JobRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> RecruitmentResult<Vec<Job>> {
        self.repo.list_jobs(true).await
    }
}

/// Single posting, open or closed
pub struct GetJobUseCase<R>
where
    R: JobRepository,
{
    repo: Arc<R>,
}

impl<R> GetJobUseCase<R>
where
    R: JobRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, job_id: JobId) -> RecruitmentResult<Job> {
        self.repo
            .find_job(job_id)
            .await?
            .ok_or(RecruitmentError::JobNotFound)
    }
}
