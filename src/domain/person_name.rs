//! src/domain/person_name.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Returns an instance of `PersonName` if the input satisfies all
    /// our validation constraints on names.
    pub fn parse(s: String) -> Result<PersonName, ValidationError> {
        let s = s.trim().to_owned();
        let is_empty = s.is_empty();
        // A grapheme is defined by the Unicode standard as a "user-perceived"
        // character: `å` is a single grapheme, but it is composed of two characters.
        let is_too_long = s.graphemes(true).count() > 256;
        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|g| forbidden_characters.contains(&g));
        if is_empty || is_too_long || contains_forbidden_characters {
            Err(ValidationError::InvalidName(s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
