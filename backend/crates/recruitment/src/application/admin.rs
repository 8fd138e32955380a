//! Admin Use Cases
//!
//! Callers are expected to have passed the admin middleware already.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use kernel::id::{ApplicationId, JobId};

use crate::domain::entities::{ApplicantView, DashboardStats, Job, JobApplication, JobDetails};
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::domain::value_objects::{Decision, NewJob};
use crate::error::{RecruitmentError, RecruitmentResult};

// ============================================================================
// Dashboard
// ============================================================================

pub struct DashboardUseCase<R>
where
    R: JobRepository + ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> DashboardUseCase<R>
where
    R: JobRepository + ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> RecruitmentResult<DashboardStats> {
        Ok(DashboardStats {
            jobs: self.repo.count_jobs().await?,
            applications: self.repo.count_applications(None).await?,
        })
    }
}

// ============================================================================
// Jobs
// ============================================================================

/// Every posting, open and closed
pub struct ListAllJobsUseCase<R>
where
    R: JobRepository,
{
    repo: Arc<R>,
}

impl<R> ListAllJobsUseCase<R>
where
    R: JobRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> RecruitmentResult<Vec<Job>> {
        self.repo.list_jobs(false).await
    }
}

pub struct JobDetailsUseCase<R>
where
    R: JobRepository + ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> JobDetailsUseCase<R>
where
    R: JobRepository + ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, job_id: JobId) -> RecruitmentResult<JobDetails> {
        let job = self
            .repo
            .find_job(job_id)
            .await?
            .ok_or(RecruitmentError::JobNotFound)?;
        let applications = self.repo.count_applications(Some(job_id)).await?;

        Ok(JobDetails { job, applications })
    }
}

#[derive(Debug, Clone)]
pub struct CreateJobInput {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
}

pub struct CreateJobUseCase<R>
where
    R: JobRepository,
{
    repo: Arc<R>,
}

impl<R> CreateJobUseCase<R>
where
    R: JobRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateJobInput) -> RecruitmentResult<Job> {
        let new_job = NewJob::new(
            &input.title,
            &input.description,
            input.location.as_deref(),
            input.salary_range.as_deref(),
        )?;

        let job = self.repo.create_job(&new_job).await?;
        tracing::info!(job_id = %job.job_id, title = %job.title, "Job created");

        Ok(job)
    }
}

/// Open or close a posting
pub struct SetJobStatusUseCase<R>
where
    R: JobRepository,
{
    repo: Arc<R>,
}

impl<R> SetJobStatusUseCase<R>
where
    R: JobRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, job_id: JobId, is_open: bool) -> RecruitmentResult<Job> {
        let job = self
            .repo
            .set_job_open(job_id, is_open)
            .await?
            .ok_or(RecruitmentError::JobNotFound)?;

        tracing::info!(job_id = %job_id, is_open, "Job status changed");
        Ok(job)
    }
}

// ============================================================================
// Applications
// ============================================================================

/// Applications to one job, with applicant contact details
pub struct ListApplicationsUseCase<R, U>
where
    R: JobRepository + ApplicationRepository,
    U: UserRepository,
{
    repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> ListApplicationsUseCase<R, U>
where
    R: JobRepository + ApplicationRepository,
    U: UserRepository,
{
    pub fn new(repo: Arc<R>, user_repo: Arc<U>) -> Self {
        Self { repo, user_repo }
    }

    pub async fn execute(&self, job_id: JobId) -> RecruitmentResult<Vec<ApplicantView>> {
        if self.repo.find_job(job_id).await?.is_none() {
            return Err(RecruitmentError::JobNotFound);
        }

        let applications = self.repo.list_applications_by_job(job_id).await?;
        let mut views = Vec::with_capacity(applications.len());

        for application in applications {
            // Applicants are removed together with their applications, so a
            // miss here means a concurrent account deletion.
            let Some(user) = self.user_repo.find_by_id(&application.user_id).await? else {
                continue;
            };
            views.push(ApplicantView {
                applicant_name: user.name.as_str().to_string(),
                applicant_email: user.email.as_str().to_string(),
                application,
            });
        }

        Ok(views)
    }
}

/// Approve or reject a pending application
pub struct ReviewApplicationUseCase<R>
where
    R: ApplicationRepository,
{
    repo: Arc<R>,
}

impl<R> ReviewApplicationUseCase<R>
where
    R: ApplicationRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        application_id: ApplicationId,
        decision: &str,
    ) -> RecruitmentResult<JobApplication> {
        let decision = Decision::parse(decision)?;

        let application = self
            .repo
            .decide_application(application_id, decision.status())
            .await?;

        tracing::info!(
            application_id = %application_id,
            status = %application.status,
            "Application decided"
        );

        Ok(application)
    }
}
