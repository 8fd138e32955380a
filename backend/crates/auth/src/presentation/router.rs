//! Auth Router

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use platform::cache::KeyValueCache;
use platform::mail::Mailer;

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_token;

/// Public routes, nested under `/auth`
pub fn auth_router<R, C, M>(state: AuthAppState<R, C, M>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R, C, M>))
        .route("/signup/code", post(handlers::request_sign_up_code::<R, C, M>))
        .route("/login", post(handlers::login::<R, C, M>))
        .route("/password/forget", post(handlers::forget_password::<R, C, M>))
        .route("/password/change", post(handlers::change_password::<R, C, M>))
        .with_state(state)
}

/// Token-protected routes, nested under `/profile`
pub fn profile_router<R, C, M>(state: AuthAppState<R, C, M>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let tokens = state.tokens.clone();

    Router::new()
        .route("/Info/{id}", get(handlers::get_profile::<R, C, M>))
        .route("/update/{id}", put(handlers::update_profile::<R, C, M>))
        .route("/delete/{id}", delete(handlers::delete_account::<R, C, M>))
        .route("/delete/{id}/code", post(handlers::request_deletion_code::<R, C, M>))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer_token))
        .with_state(state)
}
