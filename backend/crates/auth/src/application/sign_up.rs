//! Sign Up Use Case
//!
//! Creates a new user account. No auto-login: the client signs in afterwards.

use std::sync::Arc;

use kernel::id::UserId;
use platform::cache::KeyValueCache;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::verification::VerificationCodeService;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    gender::Gender,
    person_name::PersonName,
    phone::Phone,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    verification_purpose::VerificationPurpose,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    /// Registration code, checked only when the config requires it
    pub code: Option<String>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Sign up use case
pub struct SignUpUseCase<U, C>
where
    U: UserRepository,
    C: KeyValueCache,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SignUpUseCase<U, C>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate every field before touching the store
        let name = PersonName::new(&input.name)?;
        let gender = Gender::parse(&input.gender)?;
        let email = Email::new(input.email)?;
        let phone = Phone::new(&input.phone)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await?
            || self.user_repo.exists_by_phone(&phone).await?
        {
            return Err(AuthError::DuplicateUser);
        }

        if self.config.signup_requires_code {
            let code = input.code.as_deref().unwrap_or_default();
            if !self
                .codes
                .verify(VerificationPurpose::Registration, email.as_str(), code)
                .await?
            {
                return Err(AuthError::InvalidCode);
            }
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let role = if self.config.is_admin_email(&email) {
            UserRole::Admin
        } else {
            UserRole::Applicant
        };

        let user = User::new(name, gender, email, phone, password, role);

        // The store's unique constraints settle any race with the check above
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User signed up");

        Ok(SignUpOutput {
            user_id: user.user_id,
            role: user.role,
        })
    }
}

/// Mails a registration code to an email that is not yet registered
pub struct RequestSignUpCodeUseCase<U, C, M>
where
    U: UserRepository,
    C: KeyValueCache,
    M: Mailer,
{
    user_repo: Arc<U>,
    codes: VerificationCodeService<C>,
    mailer: Arc<M>,
}

impl<U, C, M> RequestSignUpCodeUseCase<U, C, M>
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

    pub async fn execute(&self, email: String) -> AuthResult<()> {
        let email = Email::new(email)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateUser);
        }

        let purpose = VerificationPurpose::Registration;
        let code = self.codes.generate(purpose, email.as_str()).await?;
        self.mailer
            .send(self.codes.message(purpose, email.as_str(), &code))
            .await?;

        tracing::info!(email_domain = %email.domain(), "Registration code sent");

        Ok(())
    }
}
