//! src/domain/phone_number.rs

use crate::domain::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;

/// Ten digit phone number, optionally prefixed with `+`, not starting with `0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(s: String) -> Result<PhoneNumber, ValidationError> {
        lazy_static! {
            static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{9}$").unwrap();
        }
        let s = s.trim().to_owned();
        if PHONE_RE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidPhone(s))
        }
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
