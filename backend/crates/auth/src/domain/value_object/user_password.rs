//! User Password Value Object
//!
//! Domain wrapper over `platform::password`: policy failures become
//! user-facing `AppError`s, hashes are stored as Argon2id PHC strings.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user; zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate against the password policy
    ///
    /// ## Validation Rules (NIST SP 800-63B)
    /// - 8 to 128 characters after NFKC normalization
    /// - No control characters
    /// - No common patterns (sequential, keyboard, dictionary)
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
                "Password must be at least {} characters (got {})",
                min, actual
            ))
            .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
                "Password must be at most {} characters (got {})",
                max, actual
            ))
            .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty").with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }

            PasswordPolicyError::CommonPattern => {
                AppError::bad_request("Password is too common or follows a predictable pattern")
                    .with_action("Please choose a more unique password")
            }
        })?;

        Ok(Self(clear_text))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated password
    ///
    /// `pepper` is the application-wide secret; the same value must be passed
    /// to [`UserPassword::verify`].
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.0.hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {}", msg))
            }
            PasswordHashError::InvalidHashFormat => {
                AppError::internal("Unexpected error during password hashing")
            }
        })?;

        Ok(Self(hashed))
    }

    /// Rebuild from the PHC string stored in `users.password_hash`
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AppError::internal("Invalid password hash in database"))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword").field("hash", &"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Correct-Horse-42".to_string()).is_ok());

        let short_pass = "Xy7!".repeat(MIN_PASSWORD_LENGTH)[..MIN_PASSWORD_LENGTH - 1].to_string();
        assert!(RawPassword::new(short_pass).is_err());

        let long_pass = "Xy7!".repeat(MAX_PASSWORD_LENGTH);
        assert!(RawPassword::new(long_pass).is_err());

        assert!(RawPassword::new("password123".to_string()).is_err());
        assert!(RawPassword::new("".to_string()).is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Correct-Horse-42".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::new("Battery-Staple-7".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let raw = RawPassword::new("Correct-Horse-42".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        assert!(hashed.verify(&raw, Some(b"pepper")));
        assert!(!hashed.verify(&raw, None));
        assert!(!hashed.verify(&raw, Some(b"other")));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("Correct-Horse-42".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string().to_string()).unwrap();
        assert!(restored.verify(&raw, None));
        assert!(UserPassword::from_phc_string("plaintext").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Correct-Horse-42".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Horse"));

        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2"));
    }
}
