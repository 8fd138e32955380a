//! Auth Middleware
//!
//! Bearer-token authentication for protected routes. A valid token puts an
//! [`AuthenticatedUser`] into the request extensions for handlers to extract.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

pub use crate::application::token::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::error::AuthError;

/// Middleware that requires a valid `Authorization: Bearer <token>` header
pub async fn require_bearer_token(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AuthError::MissingToken)?;

    let caller = tokens.validate(token)?;

    tracing::debug!(user_id = %caller.user_id, role = %caller.role, "Bearer token accepted");

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

/// Middleware that requires the authenticated caller to be an admin
///
/// Must run after [`require_bearer_token`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    let caller = req
        .extensions()
        .get::<AuthenticatedUser>()
        .copied()
        .ok_or(AuthError::MissingToken)?;

    if !caller.is_admin() {
        tracing::warn!(user_id = %caller.user_id, "Non-admin caller on admin route");
        return Err(AuthError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization` header value
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer   abc  "), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
