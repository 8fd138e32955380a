//! Request extractors
//!
//! `Json` wraps `axum::Json` so body rejections answer with the same
//! problem-details JSON as every other recruitment error.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde::Serialize;

use crate::error::RecruitmentError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(RecruitmentError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for RecruitmentError {
    fn from(rejection: JsonRejection) -> Self {
        RecruitmentError::Validation(AppError::bad_request(rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_rejection_is_bad_request() {
        let request = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let err = Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
