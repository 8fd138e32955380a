//! Request extractors
//!
//! `Json` wraps `axum::Json` so body rejections answer with the same
//! problem-details JSON as every other auth error.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use serde::Serialize;

use crate::error::AuthError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AuthError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::Validation(AppError::bad_request(rejection.body_text()))
    }
}
