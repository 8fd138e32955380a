//! Verification Purpose
//!
//! A code is only valid for the purpose it was issued for: a password-reset
//! code cannot delete an account.

use platform::crypto::sha256_hex;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationPurpose {
    Registration,
    PasswordReset,
    AccountDeletion,
}

impl VerificationPurpose {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "registration",
            VerificationPurpose::PasswordReset => "password_reset",
            VerificationPurpose::AccountDeletion => "account_deletion",
        }
    }

    /// Cache key for `contact`
    ///
    /// The contact is hashed so raw emails and phone numbers never appear in
    /// the cache keyspace.
    pub fn cache_key(&self, contact: &str) -> String {
        format!("verify:{}:{}", self.as_str(), sha256_hex(contact.as_bytes()))
    }

    /// Mail subject for a code of this purpose
    pub const fn subject(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "Confirm your email address",
            VerificationPurpose::PasswordReset => "Your password reset code",
            VerificationPurpose::AccountDeletion => "Confirm account deletion",
        }
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
