//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use platform::cache::CacheError;
use platform::mail::MailError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (carries the user-facing message)
    #[error("{0}")]
    Validation(AppError),

    #[error("User not found")]
    UserNotFound,

    /// Email or phone already registered
    #[error("A user with this email or phone already exists")]
    DuplicateUser,

    /// Wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Verification code wrong, expired or already used
    #[error("Invalid or expired verification code")]
    InvalidCode,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed")]
    InvalidToken,

    /// Authenticated but not allowed
    #[error("Insufficient permissions")]
    Forbidden,

    /// Token could not be signed (no key material)
    #[error("Failed to sign token: {0}")]
    SigningError(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Verification code store error: {0}")]
    Cache(#[from] CacheError),

    #[error("Mail delivery error: {0}")]
    Mail(#[from] MailError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(e) => e.kind(),
            AuthError::InvalidCode => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::ExpiredToken
            | AuthError::InvalidSignature
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Database(e) => classify_sqlx_error(e).0,
            AuthError::Cache(_) | AuthError::Mail(_) => ErrorKind::ServiceUnavailable,
            AuthError::SigningError(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Dependency failures keep a generic message; their detail goes to the
    /// log via [`AuthError::log`], not to the client.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Validation(e) => e,
            AuthError::Database(e) => AppError::from(e),
            AuthError::Cache(e) => {
                AppError::service_unavailable("Verification service unavailable").with_source(e)
            }
            AuthError::Mail(e) => AppError::service_unavailable("Mail delivery failed")
                .with_action("Please try again later")
                .with_source(e),
            AuthError::SigningError(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::InvalidCode => AppError::bad_request(self.to_string())
                .with_action("Request a new verification code"),
            AuthError::ExpiredToken => {
                AppError::unauthorized(self.to_string()).with_action("Please log in again")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Cache(e) => {
                tracing::error!(error = %e, "Verification code store error");
            }
            AuthError::Mail(e) => {
                tracing::error!(error = %e, "Mail delivery error");
            }
            AuthError::SigningError(msg) | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidCode => {
                tracing::warn!("Invalid verification code submitted");
            }
            AuthError::InvalidSignature => {
                tracing::warn!("Token with invalid signature rejected");
            }
            AuthError::Forbidden => {
                tracing::warn!("Forbidden request");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_client_error() {
            AuthError::Validation(err)
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::DuplicateUser.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::ExpiredToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::MissingToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::InvalidCode.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AuthError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_database_status_matches_response() {
        for err in [
            sqlx::Error::PoolTimedOut,
            sqlx::Error::PoolClosed,
            sqlx::Error::RowNotFound,
            sqlx::Error::WorkerCrashed,
        ] {
            let err = AuthError::Database(err);
            let logged = err.status_code();
            assert_eq!(logged.as_u16(), err.into_app_error().status_code());
        }
    }

    #[test]
    fn test_validation_keeps_message() {
        let err = AuthError::from(AppError::bad_request("Invalid email format"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let app = err.into_app_error();
        assert_eq!(app.message(), "Invalid email format");
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let app = AuthError::Internal("pool exploded at 0xdeadbeef".into()).into_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_server_app_error_becomes_internal() {
        let err = AuthError::from(AppError::internal("hash failure"));
        assert!(matches!(err, AuthError::Internal(_)));
    }
}
