//! HTTP Handlers

use std::sync::Arc;

use auth::application::authorize_profile_access;
use auth::domain::repository::UserRepository;
use auth::presentation::handlers::parse_user_id;
use auth::{AuthError, AuthenticatedUser};
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::SerialId;

use crate::application::{
    ApplyUseCase, CreateJobInput, CreateJobUseCase, DashboardUseCase, GetJobUseCase,
    JobDetailsUseCase, ListAllJobsUseCase, ListApplicationsUseCase, ListJobsUseCase,
    ListUserApplicationsUseCase, ReviewApplicationUseCase, SetJobStatusUseCase,
};
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::error::{RecruitmentError, RecruitmentResult};
use crate::presentation::dto::{
    ApplicantResponse, ApplicationResponse, CreateJobRequest, DashboardResponse, DecisionRequest,
    JobDetailsResponse, JobResponse, SetJobStatusRequest, UserApplicationResponse,
};
use crate::presentation::extract::Json;

/// Shared state for recruitment handlers
#[derive(Clone)]
pub struct RecruitmentAppState<R, U>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    /// Credential Store, shared with the auth crate
    pub users: Arc<U>,
}

impl<R, U> RecruitmentAppState<R, U>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, users: U) -> Self {
        Self {
            repo: Arc::new(repo),
            users: Arc::new(users),
        }
    }
}

/// Parse a positive numeric id path segment
fn parse_serial_id<T>(raw: &str, what: &str) -> RecruitmentResult<SerialId<T>> {
    match raw.parse::<i64>() {
        Ok(value) if value > 0 => Ok(SerialId::new(value)),
        _ => Err(RecruitmentError::Validation(AppError::bad_request(format!(
            "Invalid {what} id"
        )))),
    }
}

// ============================================================================
// Public Job Listing
// ============================================================================

/// GET /recruitment/jobs
pub async fn list_jobs<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
) -> RecruitmentResult<Json<Vec<JobResponse>>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let jobs = ListJobsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /recruitment/job/{job_id}
pub async fn get_job<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Path(job_id): Path<String>,
) -> RecruitmentResult<Json<JobResponse>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job_id = parse_serial_id(&job_id, "job")?;
    let job = GetJobUseCase::new(state.repo.clone()).execute(job_id).await?;
    Ok(Json(job.into()))
}

/// POST /recruitment/job/{job_id}/apply/{user_id}
///
/// Callers can only apply on their own behalf.
pub async fn apply<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path((job_id, user_id)): Path<(String, String)>,
) -> RecruitmentResult<impl IntoResponse>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job_id = parse_serial_id(&job_id, "job")?;
    let user_id = parse_user_id(&user_id)?;
    if caller.user_id != user_id {
        return Err(AuthError::Forbidden.into());
    }

    let application = ApplyUseCase::new(state.repo.clone(), state.users.clone())
        .execute(job_id, user_id)
        .await?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))))
}

/// GET /profile/status/{id}
pub async fn application_status<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> RecruitmentResult<Json<Vec<UserApplicationResponse>>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    authorize_profile_access(&caller, &user_id)?;

    let applications = ListUserApplicationsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(user_id)
        .await?;

    Ok(Json(
        applications
            .into_iter()
            .map(UserApplicationResponse::from)
            .collect(),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /admin/dashboard
pub async fn dashboard<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
) -> RecruitmentResult<Json<DashboardResponse>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let stats = DashboardUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(stats.into()))
}

/// GET /admin/jobs
pub async fn list_all_jobs<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
) -> RecruitmentResult<Json<Vec<JobResponse>>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let jobs = ListAllJobsUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// POST /admin/jobs
pub async fn create_job<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Json(req): Json<CreateJobRequest>,
) -> RecruitmentResult<impl IntoResponse>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job = CreateJobUseCase::new(state.repo.clone())
        .execute(CreateJobInput {
            title: req.title,
            description: req.description,
            location: req.location,
            salary_range: req.salary_range,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

/// GET /admin/job/{job_id}
pub async fn job_details<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Path(job_id): Path<String>,
) -> RecruitmentResult<Json<JobDetailsResponse>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job_id = parse_serial_id(&job_id, "job")?;
    let details = JobDetailsUseCase::new(state.repo.clone())
        .execute(job_id)
        .await?;
    Ok(Json(details.into()))
}

/// PUT /admin/job/{job_id}/status
pub async fn set_job_status<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Path(job_id): Path<String>,
    Json(req): Json<SetJobStatusRequest>,
) -> RecruitmentResult<Json<JobResponse>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job_id = parse_serial_id(&job_id, "job")?;
    let job = SetJobStatusUseCase::new(state.repo.clone())
        .execute(job_id, req.open)
        .await?;
    Ok(Json(job.into()))
}

/// GET /admin/applications/{job_id}
pub async fn list_applications<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Path(job_id): Path<String>,
) -> RecruitmentResult<Json<Vec<ApplicantResponse>>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let job_id = parse_serial_id(&job_id, "job")?;
    let applicants = ListApplicationsUseCase::new(state.repo.clone(), state.users.clone())
        .execute(job_id)
        .await?;
    Ok(Json(
        applicants.into_iter().map(ApplicantResponse::from).collect(),
    ))
}

/// PUT /admin/application/{application_id}
pub async fn review_application<R, U>(
    State(state): State<RecruitmentAppState<R, U>>,
    Path(application_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> RecruitmentResult<Json<ApplicationResponse>>
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let application_id = parse_serial_id(&application_id, "application")?;
    let application = ReviewApplicationUseCase::new(state.repo.clone())
        .execute(application_id, &req.decision)
        .await?;
    Ok(Json(application.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::JobId;

    #[test]
    fn test_parse_serial_id() {
        let id: JobId = parse_serial_id("42", "job").unwrap();
        assert_eq!(id.value(), 42);

        for raw in ["0", "-1", "abc", "", "4.2"] {
            let err = parse_serial_id::<kernel::id::markers::Job>(raw, "job").unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }
}
