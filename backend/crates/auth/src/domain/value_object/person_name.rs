//! Person Name Value Object
//!
//! Display name of an applicant. Unlike a login handle it may contain any
//! script and inner spaces; it is NFKC-normalized and trimmed.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const PERSON_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(name: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = name.as_ref().nfkc().collect();
        let name = normalized.trim();

        if name.is_empty() {
            return Err(AppError::bad_request("Name cannot be empty").with_action("Please enter your name"));
        }

        let length = name.chars().count();
        if length > PERSON_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters (got {})",
                PERSON_NAME_MAX_LENGTH, length
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
