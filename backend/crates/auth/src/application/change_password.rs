//! Change Password Use Case
//!
//! Replaces the password of the account owning `email`, given the reset code
//! that was mailed to it.

use std::sync::Arc;

use platform::cache::KeyValueCache;

use crate::application::config::AuthConfig;
use crate::application::verification::VerificationCodeService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
    verification_purpose::VerificationPurpose,
};
use crate::error::{AuthError, AuthResult};

pub struct ChangePasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> ChangePasswordUseCase<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    pub fn new(user_repo: Arc<U>, cache: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codes: VerificationCodeService::new(cache, config.code_ttl),
            config,
        }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> AuthResult<()> {
        let email = Email::new(input.email)?;
        // Policy is checked first so a rejected password does not burn the code
        let raw_password = RawPassword::new(input.new_password)?;

        // Unknown emails look like a wrong code
        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCode)?;

        if !self
            .codes
            .verify(VerificationPurpose::PasswordReset, user.email.as_str(), &input.code)
            .await?
        {
            return Err(AuthError::InvalidCode);
        }

        user.set_password(UserPassword::from_raw(&raw_password, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Password changed");

        Ok(())
    }
}
