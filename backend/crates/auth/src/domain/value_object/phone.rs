//! Phone Number Value Object
//!
//! Stored in a compact E.164-like form: optional leading `+` followed by
//! 7 to 15 digits. Spaces, dashes, dots and parentheses are stripped.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

const PHONE_MIN_DIGITS: usize = 7;
const PHONE_MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl AsRef<str>) -> AppResult<Self> {
        let raw = phone.as_ref().trim();

        let (plus, rest) = match raw.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '.' | '(' | ')' => {}
                _ => {
                    return Err(AppError::bad_request("Phone number contains invalid characters")
                        .with_action("Use digits, optionally starting with +"));
                }
            }
        }

        if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
            return Err(AppError::bad_request(format!(
                "Phone number must have {} to {} digits",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            )));
        }

        Ok(Self(if plus { format!("+{digits}") } else { digits }))
    }

    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_normalization() {
        assert_eq!(Phone::new("+1 (555) 010-9999").unwrap().as_str(), "+15550109999");
        assert_eq!(Phone::new("090.1234.5678").unwrap().as_str(), "09012345678");
    }

    #[test]
    fn test_phone_invalid() {
        assert!(Phone::new("").is_err());
        assert!(Phone::new("12345").is_err());
        assert!(Phone::new("1234567890123456").is_err());
        assert!(Phone::new("555-CALL-NOW").is_err());
        assert!(Phone::new("++15550109999").is_err());
    }
}
