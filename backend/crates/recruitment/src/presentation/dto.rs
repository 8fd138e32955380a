//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, JobId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    ApplicantView, ApplicationCounts, DashboardStats, Job, JobApplication, JobCounts, JobDetails,
    UserApplicationView,
};
use crate::domain::value_objects::ApplicationStatus;

// ============================================================================
// Jobs
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub job_id: JobId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.job_id,
            title: job.title,
            description: job.description,
            location: job.location,
            salary_range: job.salary_range,
            is_open: job.is_open,
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCountsResponse {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub total: i64,
}

impl From<ApplicationCounts> for ApplicationCountsResponse {
    fn from(counts: ApplicationCounts) -> Self {
        Self {
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
            total: counts.total(),
        }
    }
}

/// Admin view: the posting plus its application counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailsResponse {
    #[serde(flatten)]
    pub job: JobResponse,
    pub applications: ApplicationCountsResponse,
}

impl From<JobDetails> for JobDetailsResponse {
    fn from(details: JobDetails) -> Self {
        Self {
            job: details.job.into(),
            applications: details.applications.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetJobStatusRequest {
    pub open: bool,
}

// ============================================================================
// Applications
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<JobApplication> for ApplicationResponse {
    fn from(application: JobApplication) -> Self {
        Self {
            application_id: application.application_id,
            job_id: application.job_id,
            user_id: application.user_id,
            status: application.status,
            submitted_at: application.submitted_at,
            decided_at: application.decided_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub applicant_name: String,
    pub applicant_email: String,
}

impl From<ApplicantView> for ApplicantResponse {
    fn from(view: ApplicantView) -> Self {
        Self {
            application: view.application.into(),
            applicant_name: view.applicant_name,
            applicant_email: view.applicant_email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserApplicationResponse {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl From<UserApplicationView> for UserApplicationResponse {
    fn from(view: UserApplicationView) -> Self {
        Self {
            application_id: view.application_id,
            job_id: view.job_id,
            job_title: view.job_title,
            status: view.status,
            submitted_at: view.submitted_at,
            decided_at: view.decided_at,
        }
    }
}

/// `decision` is `approved` or `rejected`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub decision: String,
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCountsResponse {
    pub total: i64,
    pub open: i64,
}

impl From<JobCounts> for JobCountsResponse {
    fn from(counts: JobCounts) -> Self {
        Self {
            total: counts.total,
            open: counts.open,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub jobs: JobCountsResponse,
    pub applications: ApplicationCountsResponse,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            jobs: stats.jobs.into(),
            applications: stats.applications.into(),
        }
    }
}
