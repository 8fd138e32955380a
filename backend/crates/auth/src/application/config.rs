//! Application Configuration
//!
//! Configuration for the Auth application layer. Built once at startup and
//! shared behind an `Arc`.

use std::fmt;
use std::time::Duration;

use crate::domain::value_object::email::Email;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key for session tokens
    pub jwt_secret: Vec<u8>,
    /// `iss` claim written and required on every token
    pub jwt_issuer: String,
    /// Session token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Verification code lifetime (10 minutes)
    pub code_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Accounts registered with one of these emails get the admin role
    pub admin_emails: Vec<String>,
    /// Require a registration code on signup
    pub signup_requires_code: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(32),
            jwt_issuer: "recruitment-portal".to_string(),
            token_ttl: Duration::from_secs(24 * 3600),
            code_ttl: Duration::from_secs(10 * 60),
            password_pepper: None,
            admin_emails: Vec::new(),
            signup_requires_code: false,
        }
    }
}

impl AuthConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Whether `email` is configured as an admin account
    pub fn is_admin_email(&self, email: &Email) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.trim().eq_ignore_ascii_case(email.as_str()))
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("token_ttl", &self.token_ttl)
            .field("code_ttl", &self.code_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("admin_emails", &self.admin_emails)
            .field("signup_requires_code", &self.signup_requires_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_secret_is_random() {
        let a = AuthConfig::default();
        let b = AuthConfig::default();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_admin_email_match_ignores_case() {
        let config = AuthConfig {
            admin_emails: vec!["Boss@Example.com".to_string()],
            ..Default::default()
        };
        assert!(config.is_admin_email(&Email::new("boss@example.com").unwrap()));
        assert!(!config.is_admin_email(&Email::new("alice@example.com").unwrap()));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper-value".to_vec()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pepper-value"));
        assert!(debug.contains("REDACTED"));
    }
}
