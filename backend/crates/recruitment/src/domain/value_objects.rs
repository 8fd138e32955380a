//! Domain Value Objects

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const JOB_TITLE_MAX_LENGTH: usize = 200;
pub const JOB_DESCRIPTION_MAX_LENGTH: usize = 10_000;
pub const JOB_FIELD_MAX_LENGTH: usize = 200;

/// Application status
///
/// `Pending` moves to `Approved` or `Rejected` exactly once; both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "pending" => Some(ApplicationStatus::Pending),
            "approved" => Some(ApplicationStatus::Approved),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    /// Status after applying `decision`, or `None` if already decided
    pub const fn decide(self, decision: Decision) -> Option<Self> {
        match self {
            ApplicationStatus::Pending => Some(decision.status()),
            ApplicationStatus::Approved | ApplicationStatus::Rejected => None,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Admin review outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    /// Accepts the target status names `approved` / `rejected`
    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "approved" => Ok(Decision::Approve),
            "rejected" => Ok(Decision::Reject),
            other => Err(AppError::bad_request(format!("Unknown decision: {other}"))
                .with_action("Use \"approved\" or \"rejected\"")),
        }
    }

    pub const fn status(&self) -> ApplicationStatus {
        match self {
            Decision::Approve => ApplicationStatus::Approved,
            Decision::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// Validated fields for a new posting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub salary_range: Option<String>,
}

impl NewJob {
    pub fn new(
        title: &str,
        description: &str,
        location: Option<&str>,
        salary_range: Option<&str>,
    ) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request("Job title cannot be empty"));
        }
        if title.chars().count() > JOB_TITLE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Job title must be at most {} characters",
                JOB_TITLE_MAX_LENGTH
            )));
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(AppError::bad_request("Job description cannot be empty"));
        }
        if description.chars().count() > JOB_DESCRIPTION_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Job description must be at most {} characters",
                JOB_DESCRIPTION_MAX_LENGTH
            )));
        }

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            location: optional_field("location", location)?,
            salary_range: optional_field("salary range", salary_range)?,
        })
    }
}

/// Blank optional fields become `None`
fn optional_field(name: &str, value: Option<&str>) -> AppResult<Option<String>> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > JOB_FIELD_MAX_LENGTH {
        return Err(AppError::bad_request(format!(
            "Job {} must be at most {} characters",
            name, JOB_FIELD_MAX_LENGTH
        )));
    }
    Ok(Some(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        use ApplicationStatus::*;

        assert_eq!(Pending.decide(Decision::Approve), Some(Approved));
        assert_eq!(Pending.decide(Decision::Reject), Some(Rejected));
        assert_eq!(Approved.decide(Decision::Approve), None);
        assert_eq!(Approved.decide(Decision::Reject), None);
        assert_eq!(Rejected.decide(Decision::Approve), None);

        assert!(!Pending.is_terminal());
        assert!(Approved.is_terminal());
        assert!(Rejected.is_terminal());
    }

    #[test]
    fn test_status_codes() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Approved,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ApplicationStatus::from_code("withdrawn"), None);
    }

    #[test]
    fn test_decision_parse() {
        assert_eq!(Decision::parse("approved").unwrap(), Decision::Approve);
        assert_eq!(Decision::parse(" Rejected ").unwrap(), Decision::Reject);
        assert!(Decision::parse("pending").is_err());
        assert!(Decision::parse("").is_err());
    }

    #[test]
    fn test_new_job_validation() {
        let job = NewJob::new("  Backend Engineer ", "Rust services", Some(" "), Some("100-120k"))
            .unwrap();
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.location, None);
        assert_eq!(job.salary_range.as_deref(), Some("100-120k"));

        assert!(NewJob::new("", "desc", None, None).is_err());
        assert!(NewJob::new("Title", "   ", None, None).is_err());
        assert!(NewJob::new(&"x".repeat(JOB_TITLE_MAX_LENGTH + 1), "desc", None, None).is_err());
    }
}
