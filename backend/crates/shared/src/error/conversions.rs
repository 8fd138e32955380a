//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`].

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::TimedOut => ErrorKind::ServiceUnavailable,
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid integer format").with_source(err)
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::bad_request("Invalid identifier").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a sqlx error into the kind and client message used for it
///
/// Shared by [`AppError::from`] and the crate-local error enums so the logged
/// status and the response status agree.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> (ErrorKind, &'static str) {
    match err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "Record not found"),
        sqlx::Error::PoolTimedOut => (
            ErrorKind::ServiceUnavailable,
            "Database connection pool exhausted",
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL error codes
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 23: Integrity Constraint Violation
                Some("23505") => (ErrorKind::Conflict, "Duplicate key value"),
                Some("23503") => (ErrorKind::Conflict, "Foreign key violation"),
                Some("23502") => (ErrorKind::BadRequest, "Required field is null"),
                Some("23514") => (ErrorKind::BadRequest, "Check constraint violation"),
                // Class 53: Insufficient Resources
                Some("53000" | "53100" | "53200" | "53300") => {
                    (ErrorKind::ServiceUnavailable, "Database resource exhausted")
                }
                // Class 57: Operator Intervention (57014 = statement timeout)
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                    (ErrorKind::ServiceUnavailable, "Database unavailable")
                }
                _ => (ErrorKind::InternalServerError, "Database error"),
            }
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolClosed => {
            (ErrorKind::ServiceUnavailable, "Database connection error")
        }
        _ => (ErrorKind::InternalServerError, "Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let (kind, message) = classify_sqlx_error(&err);
        AppError::new(kind, message).with_source(err)
    }
}

/// Whether a sqlx error is a unique-constraint violation on `constraint`
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.problem_details())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);

        let io_err = std::io::Error::other("boom");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
    }

    #[test]
    fn test_uuid_error_conversion() {
        let err = "nope".parse::<uuid::Uuid>().unwrap_err();
        let app_err: AppError = err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_pool_errors_are_unavailable() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);

        let (kind, _) = classify_sqlx_error(&sqlx::Error::PoolClosed);
        assert_eq!(kind, ErrorKind::ServiceUnavailable);

        let (kind, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }
}
