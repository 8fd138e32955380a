use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Gender::*;
        match self {
            Male => "male",
            Female => "female",
            Other => "other",
            Unspecified => "unspecified",
        }
    }

    /// Parse user input (case-insensitive, empty means unspecified)
    pub fn parse(input: &str) -> AppResult<Self> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Ok(Gender::Unspecified);
        }
        Self::from_code(&input).ok_or_else(|| {
            AppError::bad_request(format!("Unknown gender: {}", input))
                .with_action("Use one of: male, female, other, unspecified")
        })
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Gender::*;
        match code {
            "male" => Some(Male),
            "female" => Some(Female),
            "other" => Some(Other),
            "unspecified" => Some(Unspecified),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("Female").unwrap(), Gender::Female);
        assert_eq!(Gender::parse(" male ").unwrap(), Gender::Male);
        assert_eq!(Gender::parse("").unwrap(), Gender::Unspecified);
        assert!(Gender::parse("robot").is_err());
    }

    #[test]
    fn test_gender_code_roundtrip() {
        for g in [Gender::Male, Gender::Female, Gender::Other, Gender::Unspecified] {
            assert_eq!(Gender::from_code(g.code()), Some(g));
        }
    }
}
