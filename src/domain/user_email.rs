//! src/domain/user_email.rs

use crate::domain::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEmail(String);

impl UserEmail {
    pub fn parse(s: String) -> Result<UserEmail, ValidationError> {
        lazy_static! {
            static ref EMAIL_RE: Regex =
                Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
        }
        let s = s.trim().to_owned();
        if EMAIL_RE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail(s))
        }
    }
}

impl AsRef<str> for UserEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
