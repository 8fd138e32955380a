//! Forget Password Use Case
//!
//! Mails a password-reset code to a registered email.

use std::sync::Arc;

use platform::cache::KeyValueCache;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::verification::VerificationCodeService;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, verification_purpose::VerificationPurpose};
use crate::error::{AuthError, AuthResult};

pub struct ForgetPasswordUseCase<U, C, M>
where
    U: UserRepository,
    C: KeyValueCache,
    M: Mailer,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
    mailer: Arc<M>,
}

impl<U, C, M> ForgetPasswordUseCase<U, C, M>
where
    U: UserRepository,
    C: KeyValueCache,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, cache: Arc<C>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codes: VerificationCodeService::new(cache, config.code_ttl),
            mailer,
        }
    }

    /// Fails with `UserNotFound` for unknown emails; the HTTP layer decides
    /// whether to reveal that.
    pub async fn execute(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let purpose = VerificationPurpose::PasswordReset;
        let code = self.codes.generate(purpose, user.email.as_str()).await?;
        self.mailer
            .send(self.codes.message(purpose, user.email.as_str(), &code))
            .await?;

        tracing::info!(user_id = %user.user_id, "Password reset code sent");

        Ok(())
    }
}
