//! Verification Code Service
//!
//! Six-digit one-time codes kept in the key/value cache under
//! `(purpose, contact)`. Generating overwrites any previous code for the same
//! pair; a successful verification deletes the code atomically, so a code can
//! never verify twice even under concurrent submissions.

use std::sync::Arc;
use std::time::Duration;

use platform::cache::KeyValueCache;
use platform::crypto::random_digits;
use platform::mail::MailMessage;

use crate::domain::value_object::verification_purpose::VerificationPurpose;
use crate::error::AuthResult;

pub const CODE_LENGTH: usize = 6;

pub struct VerificationCodeService<C>
where
    C: KeyValueCache,
{
    cache: Arc<C>,
    ttl: Duration,
}

impl<C> VerificationCodeService<C>
where
    C: KeyValueCache,
{
    pub fn new(cache: Arc<C>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Create and store a fresh code for `contact`
    pub async fn generate(&self, purpose: VerificationPurpose, contact: &str) -> AuthResult<String> {
        let code = random_digits(CODE_LENGTH);

        self.cache
            .set_with_ttl(&purpose.cache_key(contact), &code, self.ttl)
            .await?;

        tracing::debug!(purpose = %purpose, ttl_secs = self.ttl.as_secs(), "Verification code issued");

        Ok(code)
    }

    /// Consume the code if `submitted` matches
    ///
    /// Mismatch, expiry and absence all return `Ok(false)` and leave the
    /// stored code (if any) untouched.
    pub async fn verify(
        &self,
        purpose: VerificationPurpose,
        contact: &str,
        submitted: &str,
    ) -> AuthResult<bool> {
        let submitted = submitted.trim();
        if submitted.len() != CODE_LENGTH || !submitted.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(false);
        }

        let matched = self
            .cache
            .take_if_equals(&purpose.cache_key(contact), submitted)
            .await?;

        Ok(matched)
    }

    /// Message carrying `code` to `to`
    pub fn message(&self, purpose: VerificationPurpose, to: &str, code: &str) -> MailMessage {
        let minutes = (self.ttl.as_secs() / 60).max(1);
        let body = format!(
            "Your verification code is {code}.\n\n\
             It expires in {minutes} minutes and can be used once.\n\
             If you did not request this, you can ignore this email."
        );
        MailMessage::new(to, purpose.subject(), body)
    }
}
