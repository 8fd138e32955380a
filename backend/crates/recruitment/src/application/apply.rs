//! Apply Use Case

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::id::{JobId, UserId};

use crate::domain::entities::JobApplication;
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::error::{RecruitmentError, RecruitmentResult};

pub struct ApplyUseCase<R, U>
where
    R: JobRepository + ApplicationRepository,
    U: UserRepository,
{
    repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> ApplyUseCase<R, U>
where
    R: JobRepository + ApplicationRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self { repo, user_repo }
    }

    /// Submit a pending application
    ///
    /// Uniqueness of `(job, user)` is enforced by the store, so two
    /// concurrent submissions yield one success and one `DuplicateApplication`.
    pub async fn execute(&self, job_id: JobId, user_id: UserId) -> RecruitmentResult<JobApplication> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or(RecruitmentError::JobNotFound)?;

        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(RecruitmentError::UserNotFound);
        }

        if !job.is_open {
            return Err(RecruitmentError::JobClosed);
        }

        let application = self.repo.create_application(job_id, user_id).await?;

        tracing::info!(
            application_id = %application.application_id,
            job_id = %job_id,
            user_id = %user_id,
            "Application submitted"
        );

        Ok(application)
    }
}
