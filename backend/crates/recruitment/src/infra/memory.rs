//! In-memory Job Store
//!
//! Same contract as the PostgreSQL store: `(job, user)` uniqueness and the
//! pending-only decision are checked under one lock. Used by tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{ApplicationId, JobId, UserId};
use tokio::sync::Mutex;

use crate::domain::entities::{
    ApplicationCounts, Job, JobApplication, JobCounts, UserApplicationView,
};
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::domain::value_objects::{ApplicationStatus, NewJob};
use crate::error::{RecruitmentError, RecruitmentResult};

#[derive(Default)]
struct State {
    jobs: BTreeMap<JobId, Job>,
    applications: BTreeMap<ApplicationId, JobApplication>,
    last_job_id: i64,
    last_application_id: i64,
}

/// Clones share the same state.
#[derive(Clone, Default)]
pub struct InMemoryRecruitmentRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRecruitmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a posting with a fixed id; later ids continue after it
    pub async fn insert_job(&self, job: Job) {
        let mut state = self.state.lock().await;
        state.last_job_id = state.last_job_id.max(job.job_id.value());
        state.jobs.insert(job.job_id, job);
    }

    /// Drop every application of `user_id`, as the foreign key cascade does
    pub async fn remove_user(&self, user_id: UserId) {
        self.state
            .lock()
            .await
            .applications
            .retain(|_, a| a.user_id != user_id);
    }
}

impl JobRepository for InMemoryRecruitmentRepository {
    async fn create_job(&self, job: &NewJob) -> RecruitmentResult<Job> {
        let mut state = self.state.lock().await;
        state.last_job_id += 1;

        let now = Utc::now();
        let job = Job {
            job_id: JobId::new(state.last_job_id),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            salary_range: job.salary_range.clone(),
            is_open: true,
            created_at: now,
            updated_at: now,
        };
        state.jobs.insert(job.job_id, job.clone());

        Ok(job)
    }

    async fn find_job(&self, job_id: JobId) -> RecruitmentResult<Option<Job>> {
        Ok(self.state.lock().await.jobs.get(&job_id).cloned())
    }

    async fn list_jobs(&self, open_only: bool) -> RecruitmentResult<Vec<Job>> {
        let state = self.state.lock().await;
        let mut jobs: Vec<Job> = state
            .jobs
            .values()
            .filter(|j| j.is_open || !open_only)
            .cloned()
            .collect();
        jobs.sort_by(|a, b| (b.created_at, b.job_id).cmp(&(a.created_at, a.job_id)));

        Ok(jobs)
    }

    async fn set_job_open(&self, job_id: JobId, is_open: bool) -> RecruitmentResult<Option<Job>> {
        let mut state = self.state.lock().await;
        let Some(job) = state.jobs.get_mut(&job_id) else {
            return Ok(None);
        };
        job.is_open = is_open;
        job.updated_at = Utc::now();

        Ok(Some(job.clone()))
    }

    async fn count_jobs(&self) -> RecruitmentResult<JobCounts> {
        let state = self.state.lock().await;
        Ok(JobCounts {
            total: state.jobs.len() as i64,
            open: state.jobs.values().filter(|j| j.is_open).count() as i64,
        })
    }
}

impl ApplicationRepository for InMemoryRecruitmentRepository {
    async fn create_application(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> RecruitmentResult<JobApplication> {
        let mut state = self.state.lock().await;

        if !state.jobs.contains_key(&job_id) {
            return Err(RecruitmentError::JobNotFound);
        }
        if state
            .applications
            .values()
            .any(|a| a.job_id == job_id && a.user_id == user_id)
        {
            return Err(RecruitmentError::DuplicateApplication);
        }

        state.last_application_id += 1;
        let application = JobApplication {
            application_id: ApplicationId::new(state.last_application_id),
            job_id,
            user_id,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
            decided_at: None,
        };
        state
            .applications
            .insert(application.application_id, application.clone());

        Ok(application)
    }

    async fn find_application(
        &self,
        application_id: ApplicationId,
    ) -> RecruitmentResult<Option<JobApplication>> {
        Ok(self
            .state
            .lock()
            .await
            .applications
            .get(&application_id)
            .cloned())
    }

    async fn list_applications_by_job(&self, job_id: JobId) -> RecruitmentResult<Vec<JobApplication>> {
        Ok(self
            .state
            .lock()
            .await
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn list_applications_by_user(
        &self,
        user_id: UserId,
    ) -> RecruitmentResult<Vec<UserApplicationView>> {
        let state = self.state.lock().await;

        let mut views: Vec<UserApplicationView> = state
            .applications
            .values()
            .rev()
            .filter(|a| a.user_id == user_id)
            .filter_map(|a| {
                let job = state.jobs.get(&a.job_id)?;
                Some(UserApplicationView {
                    application_id: a.application_id,
                    job_id: a.job_id,
                    job_title: job.title.clone(),
                    status: a.status,
                    submitted_at: a.submitted_at,
                    decided_at: a.decided_at,
                })
            })
            .collect();
        views.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(views)
    }

    async fn decide_application(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> RecruitmentResult<JobApplication> {
        let mut state = self.state.lock().await;
        let application = state
            .applications
            .get_mut(&application_id)
            .ok_or(RecruitmentError::ApplicationNotFound)?;

        if application.status.is_terminal() {
            return Err(RecruitmentError::AlreadyDecided);
        }
        application.status = status;
        application.decided_at = Some(Utc::now());

        Ok(application.clone())
    }

    async fn count_applications(&self, job_id: Option<JobId>) -> RecruitmentResult<ApplicationCounts> {
        let state = self.state.lock().await;
        let mut counts = ApplicationCounts::default();
        state
            .applications
            .values()
            .filter(|a| job_id.is_none_or(|id| a.job_id == id))
            .for_each(|a| counts.record(a.status));

        Ok(counts)
    }
}
