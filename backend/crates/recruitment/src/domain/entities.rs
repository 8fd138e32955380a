//! Domain Entities
//!
//! Core business entities for the recruitment domain.

use chrono::{DateTime, Utc};
use kernel::id::{ApplicationId, JobId, UserId};

use crate::domain::value_objects::ApplicationStatus;

/// Job posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub job_id: JobId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    /// Closed postings stay readable but accept no applications
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One user's application to one job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplication {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub user_id: UserId,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    /// Set when the status leaves `Pending`
    pub decided_at: Option<DateTime<Utc>>,
}

/// Application as seen by its applicant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserApplicationView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

/// Application as seen by a reviewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantView {
    pub application: JobApplication,
    pub applicant_name: String,
    pub applicant_email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationCounts {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
}

impl ApplicationCounts {
    pub fn total(&self) -> i64 {
        self.pending + self.approved + self.rejected
    }

    pub fn record(&mut self, status: ApplicationStatus) {
        match status {
            ApplicationStatus::Pending => self.pending += 1,
            ApplicationStatus::Approved => self.approved += 1,
            ApplicationStatus::Rejected => self.rejected += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobCounts {
    pub total: i64,
    pub open: i64,
}

/// Admin view of one posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub job: Job,
    pub applications: ApplicationCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub jobs: JobCounts,
    pub applications: ApplicationCounts,
}
