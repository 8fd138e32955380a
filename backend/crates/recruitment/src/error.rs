//! Recruitment Error Types
//!
//! This module provides recruitment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Recruitment-specific result type alias
pub type RecruitmentResult<T> = Result<T, RecruitmentError>;

/// Recruitment-specific error variants
#[derive(Debug, Error)]
pub enum RecruitmentError {
    /// Malformed input (carries the user-facing message)
    #[error("{0}")]
    Validation(AppError),

    #[error("Job not found")]
    JobNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Application not found")]
    ApplicationNotFound,

    /// Same user already applied to this job
    #[error("You have already applied to this job")]
    DuplicateApplication,

    /// Approve/reject on an application that is no longer pending
    #[error("Application has already been decided")]
    AlreadyDecided,

    #[error("Job is closed for applications")]
    JobClosed,

    /// Token or credential failures from the auth crate
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecruitmentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RecruitmentError::Validation(e) => e.kind(),
            RecruitmentError::JobNotFound
            | RecruitmentError::UserNotFound
            | RecruitmentError::ApplicationNotFound => ErrorKind::NotFound,
            RecruitmentError::DuplicateApplication
            | RecruitmentError::AlreadyDecided
            | RecruitmentError::JobClosed => ErrorKind::Conflict,
            RecruitmentError::Auth(e) => e.kind(),
            RecruitmentError::Database(e) => classify_sqlx_error(e).0,
            RecruitmentError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            RecruitmentError::Validation(e) => e,
            RecruitmentError::Auth(e) => e.into_app_error(),
            RecruitmentError::Database(e) => AppError::from(e),
            RecruitmentError::Internal(_) => AppError::internal("Internal server error"),
            RecruitmentError::JobClosed => AppError::conflict(self.to_string())
                .with_action("Choose another open job"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            RecruitmentError::Database(e) => {
                tracing::error!(error = %e, "Recruitment database error");
            }
            RecruitmentError::Internal(msg) => {
                tracing::error!(message = %msg, "Recruitment internal error");
            }
            RecruitmentError::Auth(e) => e.log(),
            RecruitmentError::AlreadyDecided => {
                tracing::warn!("Attempt to re-decide an application");
            }
            _ => {
                tracing::debug!(error = %self, "Recruitment error");
            }
        }
    }
}

impl IntoResponse for RecruitmentError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for RecruitmentError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            RecruitmentError::Validation(err)
        } else {
            RecruitmentError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RecruitmentError::JobNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(RecruitmentError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RecruitmentError::ApplicationNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RecruitmentError::DuplicateApplication.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(RecruitmentError::AlreadyDecided.status_code(), StatusCode::CONFLICT);
        assert_eq!(RecruitmentError::JobClosed.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            RecruitmentError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_auth_errors_keep_their_status() {
        let err = RecruitmentError::from(AuthError::Forbidden);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = RecruitmentError::from(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_database_status_matches_response() {
        for err in [
            sqlx::Error::PoolTimedOut,
            sqlx::Error::PoolClosed,
            sqlx::Error::RowNotFound,
            sqlx::Error::WorkerCrashed,
        ] {
            let err = RecruitmentError::Database(err);
            let logged = err.status_code();
            assert_eq!(logged.as_u16(), err.into_app_error().status_code());
        }
    }

    #[test]
    fn test_validation_keeps_message() {
        let err = RecruitmentError::from(AppError::bad_request("Invalid job id"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_app_error().message(), "Invalid job id");
    }
}
