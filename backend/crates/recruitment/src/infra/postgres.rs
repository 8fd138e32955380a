//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{ApplicationId, JobId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{
    ApplicationCounts, Job, JobApplication, JobCounts, UserApplicationView,
};
use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::domain::value_objects::{ApplicationStatus, NewJob};
use crate::error::{RecruitmentError, RecruitmentResult};

const JOB_APPLICATIONS_JOB_USER_KEY: &str = "job_applications_job_user_key";

const JOB_COLUMNS: &str = r#"
    job_id,
    title,
    description,
    location,
    salary_range,
    is_open,
    created_at,
    updated_at
"#;

const APPLICATION_COLUMNS: &str = r#"
    application_id,
    job_id,
    user_id,
    status,
    submitted_at,
    decided_at
"#;

/// PostgreSQL-backed Job Store
#[derive(Clone)]
pub struct PgRecruitmentRepository {
    pool: PgPool,
}

impl PgRecruitmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Job Repository Implementation
// ============================================================================

impl JobRepository for PgRecruitmentRepository {
    async fn create_job(&self, job: &NewJob) -> RecruitmentResult<Job> {
        let sql = format!(
            r#"
            INSERT INTO jobs (title, description, location, salary_range)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(&job.title)
            .bind(&job.description)
            .bind(job.location.as_deref())
            .bind(job.salary_range.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn find_job(&self, job_id: JobId) -> RecruitmentResult<Option<Job>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE job_id = $1");
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(job_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Job::from))
    }

    async fn list_jobs(&self, open_only: bool) -> RecruitmentResult<Vec<Job>> {
        let sql = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE is_open OR NOT $1
            ORDER BY created_at DESC, job_id DESC
            "#
        );
        let rows = sqlx::query_as::<_, JobRow>(&sql)
            .bind(open_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn set_job_open(&self, job_id: JobId, is_open: bool) -> RecruitmentResult<Option<Job>> {
        let sql = format!(
            r#"
            UPDATE jobs SET
                is_open = $2,
                updated_at = NOW()
            WHERE job_id = $1
            RETURNING {JOB_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(job_id.value())
            .bind(is_open)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Job::from))
    }

    async fn count_jobs(&self) -> RecruitmentResult<JobCounts> {
        let (total, open) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE is_open) FROM jobs",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(JobCounts { total, open })
    }
}

// ============================================================================
// Application Repository Implementation
// ============================================================================

impl ApplicationRepository for PgRecruitmentRepository {
    async fn create_application(
        &self,
        job_id: JobId,
        user_id: UserId,
    ) -> RecruitmentResult<JobApplication> {
        let sql = format!(
            r#"
            INSERT INTO job_applications (job_id, user_id, status)
            VALUES ($1, $2, $3)
            RETURNING {APPLICATION_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id.value())
            .bind(user_id.as_uuid())
            .bind(ApplicationStatus::Pending.code())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, JOB_APPLICATIONS_JOB_USER_KEY) {
                    RecruitmentError::DuplicateApplication
                } else {
                    RecruitmentError::Database(e)
                }
            })?;

        row.try_into()
    }

    async fn find_application(
        &self,
        application_id: ApplicationId,
    ) -> RecruitmentResult<Option<JobApplication>> {
        let sql = format!(
            "SELECT {APPLICATION_COLUMNS} FROM job_applications WHERE application_id = $1"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(JobApplication::try_from).transpose()
    }

    async fn list_applications_by_job(&self, job_id: JobId) -> RecruitmentResult<Vec<JobApplication>> {
        let sql = format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM job_applications
            WHERE job_id = $1
            ORDER BY submitted_at, application_id
            "#
        );
        let rows = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(job_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(JobApplication::try_from).collect()
    }

    async fn list_applications_by_user(
        &self,
        user_id: UserId,
    ) -> RecruitmentResult<Vec<UserApplicationView>> {
        let rows = sqlx::query_as::<_, UserApplicationRow>(
            r#"
            SELECT
                a.application_id,
                a.job_id,
                j.title AS job_title,
                a.status,
                a.submitted_at,
                a.decided_at
            FROM job_applications a
            JOIN jobs j ON j.job_id = a.job_id
            WHERE a.user_id = $1
            ORDER BY a.submitted_at DESC, a.application_id DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserApplicationView::try_from).collect()
    }

    async fn decide_application(
        &self,
        application_id: ApplicationId,
        status: ApplicationStatus,
    ) -> RecruitmentResult<JobApplication> {
        // The status guard makes the transition a compare-and-set.
        let sql = format!(
            r#"
            UPDATE job_applications SET
                status = $2,
                decided_at = NOW()
            WHERE application_id = $1 AND status = $3
            RETURNING {APPLICATION_COLUMNS}
            "#
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application_id.value())
            .bind(status.code())
            .bind(ApplicationStatus::Pending.code())
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            return row.try_into();
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_applications WHERE application_id = $1)",
        )
        .bind(application_id.value())
        .fetch_one(&self.pool)
        .await?;

        Err(if exists {
            RecruitmentError::AlreadyDecided
        } else {
            RecruitmentError::ApplicationNotFound
        })
    }

    async fn count_applications(&self, job_id: Option<JobId>) -> RecruitmentResult<ApplicationCounts> {
        let (pending, approved, rejected) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending'),
                COUNT(*) FILTER (WHERE status = 'approved'),
                COUNT(*) FILTER (WHERE status = 'rejected')
            FROM job_applications
            WHERE $1::BIGINT IS NULL OR job_id = $1
            "#,
        )
        .bind(job_id.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(ApplicationCounts {
            pending,
            approved,
            rejected,
        })
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    job_id: i64,
    title: String,
    description: String,
    location: Option<String>,
    salary_range: Option<String>,
    is_open: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            job_id: JobId::new(row.job_id),
            title: row.title,
            description: row.description,
            location: row.location,
            salary_range: row.salary_range,
            is_open: row.is_open,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ApplicationRow {
    application_id: i64,
    job_id: i64,
    user_id: Uuid,
    status: String,
    submitted_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
}

impl TryFrom<ApplicationRow> for JobApplication {
    type Error = RecruitmentError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: ApplicationId::new(row.application_id),
            job_id: JobId::new(row.job_id),
            user_id: UserId::from_uuid(row.user_id),
            status: parse_status(&row.status)?,
            submitted_at: row.submitted_at,
            decided_at: row.decided_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserApplicationRow {
    application_id: i64,
    job_id: i64,
    job_title: String,
    status: String,
    submitted_at: DateTime<Utc>,
    decided_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserApplicationRow> for UserApplicationView {
    type Error = RecruitmentError;

    fn try_from(row: UserApplicationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            application_id: ApplicationId::new(row.application_id),
            job_id: JobId::new(row.job_id),
            job_title: row.job_title,
            status: parse_status(&row.status)?,
            submitted_at: row.submitted_at,
            decided_at: row.decided_at,
        })
    }
}

fn parse_status(code: &str) -> RecruitmentResult<ApplicationStatus> {
    ApplicationStatus::from_code(code)
        .ok_or_else(|| RecruitmentError::Internal(format!("Invalid application status: {code}")))
}
