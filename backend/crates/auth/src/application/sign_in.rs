//! Sign In Use Case
//!
//! Authenticates a user by email and password and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: UserId,
    pub role: UserRole,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let email = Email::new(input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A password that fails the policy can never match a stored hash
        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            tracing::warn!(user_id = %user.user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(user.user_id, user.role)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User signed in");

        Ok(SignInOutput {
            token: issued.token,
            expires_at: issued.expires_at,
            user_id: user.user_id,
            role: user.role,
        })
    }
}
