//! HTTP Handlers

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use platform::cache::KeyValueCache;
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedUser, ChangePasswordInput, ChangePasswordUseCase, DeleteAccountUseCase,
    ForgetPasswordUseCase, GetProfileUseCase, RequestDeletionCodeUseCase,
    RequestSignUpCodeUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    TokenService, UpdateProfileInput, UpdateProfileUseCase, authorize_profile_access,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AcceptedResponse, ChangePasswordRequest, DeleteAccountRequest, EmailRequest, LoginRequest,
    LoginResponse, ProfileResponse, SignUpRequest, SignUpResponse, UpdateProfileRequest,
};
use crate::presentation::extract::Json;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, C, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cache: Arc<C>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, C, M> AuthAppState<R, C, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, cache: C, mailer: M, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            cache: Arc::new(cache),
            mailer: Arc::new(mailer),
            tokens: Arc::new(TokenService::new(&config)),
            config: Arc::new(config),
        }
    }
}

const CODE_SENT: &str = "If the address is registered, a verification code has been sent";

/// Parse a user id path segment
pub fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse()
        .map_err(|_| AuthError::Validation(AppError::bad_request("Invalid user id")))
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.cache.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        gender: req.gender,
        email: req.email,
        phone: req.phone,
        password: req.password,
        code: req.code,
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: output.user_id.to_string(),
            role: output.role,
        }),
    ))
}

/// POST /auth/signup/code
pub async fn request_sign_up_code<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RequestSignUpCodeUseCase::new(
        state.repo.clone(),
        state.cache.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.execute(req.email).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            message: "A verification code has been sent",
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.tokens.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        token_type: "Bearer",
        expires_at: output.expires_at,
        user_id: output.user_id.to_string(),
        role: output.role,
    }))
}

// ============================================================================
// Password
// ============================================================================

/// POST /auth/password/forget
///
/// Answers 202 whether or not the email is registered.
pub async fn forget_password<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ForgetPasswordUseCase::new(
        state.repo.clone(),
        state.cache.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    match use_case.execute(req.email).await {
        Ok(()) => {}
        Err(AuthError::UserNotFound) => {
            tracing::debug!("Password reset requested for unknown email");
        }
        Err(e) => return Err(e),
    }

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { message: CODE_SENT })))
}

/// POST /auth/password/change
pub async fn change_password<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case =
        ChangePasswordUseCase::new(state.repo.clone(), state.cache.clone(), state.config.clone());

    use_case
        .execute(ChangePasswordInput {
            email: req.email,
            code: req.code,
            new_password: req.new_password,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile/Info/{id}
pub async fn get_profile<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    authorize_profile_access(&caller, &user_id)?;

    let user = GetProfileUseCase::new(state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(user.into()))
}

/// PUT /profile/update/{id}
pub async fn update_profile<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<ProfileResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    authorize_profile_access(&caller, &user_id)?;

    let user = UpdateProfileUseCase::new(state.repo.clone())
        .execute(
            &user_id,
            UpdateProfileInput {
                email: req.email,
                phone: req.phone,
            },
        )
        .await?;

    Ok(Json(user.into()))
}

/// POST /profile/delete/{id}/code
pub async fn request_deletion_code<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    authorize_profile_access(&caller, &user_id)?;

    RequestDeletionCodeUseCase::new(
        state.repo.clone(),
        state.cache.clone(),
        state.mailer.clone(),
        state.config.clone(),
    )
    .execute(&user_id)
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            message: "A verification code has been sent to the account email",
        }),
    ))
}

/// DELETE /profile/delete/{id}
pub async fn delete_account<R, C, M>(
    State(state): State<AuthAppState<R, C, M>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    Json(req): Json<DeleteAccountRequest>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    C: KeyValueCache + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    authorize_profile_access(&caller, &user_id)?;

    DeleteAccountUseCase::new(state.repo.clone(), state.cache.clone(), state.config.clone())
        .execute(&user_id, &req.code)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
