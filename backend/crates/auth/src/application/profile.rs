//! Profile Use Cases
//!
//! Read, update and delete the caller's own account. Access control
//! (subject == target or admin) is [`authorize_profile_access`].

use std::sync::Arc;

use kernel::id::UserId;
use platform::cache::KeyValueCache;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::token::AuthenticatedUser;
use crate::application::verification::VerificationCodeService;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, phone::Phone, verification_purpose::VerificationPurpose,
};
use crate::error::{AuthError, AuthResult};
use kernel::error::app_error::AppError;

/// A user may act on their own profile; admins may act on any
pub fn authorize_profile_access(caller: &AuthenticatedUser, target: &UserId) -> AuthResult<()> {
    if caller.user_id == *target || caller.is_admin() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

// ============================================================================
// Get
// ============================================================================

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

// ============================================================================
// Update
// ============================================================================

pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub struct UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> UpdateProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId, input: UpdateProfileInput) -> AuthResult<User> {
        if input.email.is_none() && input.phone.is_none() {
            return Err(AppError::bad_request("Nothing to update")
                .with_action("Provide an email or a phone number")
                .into());
        }

        let email = input.email.map(Email::new).transpose()?;
        let phone = input.phone.as_deref().map(Phone::new).transpose()?;

        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(email) = email {
            if email != user.email {
                if let Some(other) = self.user_repo.find_by_email(&email).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::DuplicateUser);
                    }
                }
                user.set_email(email);
            }
        }

        if let Some(phone) = phone {
            if phone != user.phone {
                if let Some(other) = self.user_repo.find_by_phone(&phone).await? {
                    if other.user_id != user.user_id {
                        return Err(AuthError::DuplicateUser);
                    }
                }
                user.set_phone(phone);
            }
        }

        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(user)
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Issues an account-deletion code keyed by the user's phone
///
/// Mail is the only delivery channel, so the code goes to the account email.
pub struct RequestDeletionCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: KeyValueCache,
    M: Mailer,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
    mailer: Arc<M>,
}

impl<U, C, M> RequestDeletionCodeUseCase<U, C, M>
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

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<()> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let purpose = VerificationPurpose::AccountDeletion;
        let code = self.codes.generate(purpose, user.phone.as_str()).await?;
        self.mailer
            .send(self.codes.message(purpose, user.email.as_str(), &code))
            .await?;

        tracing::info!(user_id = %user.user_id, "Account deletion code sent");

        Ok(())
    }
}

pub struct DeleteAccountUseCase<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
}

impl<U, C> DeleteAccountUseCase<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    pub fn new(user_repo: Arc<U>, cache: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codes: VerificationCodeService::new(cache, config.code_ttl),
        }
    }

    /// Hard delete after phone verification. Applications go with the
    /// user through the store's cascade.
    pub async fn execute(&self, user_id: &UserId, code: &str) -> AuthResult<()> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !self
            .codes
            .verify(VerificationPurpose::AccountDeletion, user.phone.as_str(), code)
            .await?
        {
            return Err(AuthError::InvalidCode);
        }

        if !self.user_repo.delete(&user.user_id).await? {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user.user_id, "Account deleted");

        Ok(())
    }
}
