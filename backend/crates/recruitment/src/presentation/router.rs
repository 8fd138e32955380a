//! Recruitment Router

use std::sync::Arc;

use auth::TokenService;
use auth::domain::repository::UserRepository;
use auth::middleware::{require_admin, require_bearer_token};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::domain::repository::{ApplicationRepository, JobRepository};
use crate::presentation::handlers::{self, RecruitmentAppState};

/// Job routes, nested under `/recruitment`
///
/// Listing and detail are public; applying needs a bearer token.
pub fn recruitment_router<R, U>(state: RecruitmentAppState<R, U>, tokens: Arc<TokenService>) -> Router
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let protected = Router::new()
        .route("/job/{job_id}/apply/{user_id}", post(handlers::apply::<R, U>))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer_token));

    Router::new()
        .route("/jobs", get(handlers::list_jobs::<R, U>))
        .route("/job/{job_id}", get(handlers::get_job::<R, U>))
        .merge(protected)
        .with_state(state)
}

/// Application status, merged into the `/profile` routes
pub fn application_status_router<R, U>(
    state: RecruitmentAppState<R, U>,
    tokens: Arc<TokenService>,
) -> Router
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/status/{id}", get(handlers::application_status::<R, U>))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer_token))
        .with_state(state)
}

/// Admin routes, nested under `/admin`
pub fn admin_router<R, U>(state: RecruitmentAppState<R, U>, tokens: Arc<TokenService>) -> Router
where
    R: JobRepository + ApplicationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    // Layers run bottom-up: the token is validated before the role check.
    Router::new()
        .route("/dashboard", get(handlers::dashboard::<R, U>))
        .route(
            "/jobs",
            get(handlers::list_all_jobs::<R, U>).post(handlers::create_job::<R, U>),
        )
        .route("/job/{job_id}", get(handlers::job_details::<R, U>))
        .route("/job/{job_id}/status", put(handlers::set_job_status::<R, U>))
        .route(
            "/applications/{job_id}",
            get(handlers::list_applications::<R, U>),
        )
        .route(
            "/application/{application_id}",
            put(handlers::review_application::<R, U>),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(tokens, require_bearer_token))
        .with_state(state)
}
