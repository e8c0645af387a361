//! src/domain/username.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

/// Unique login name; primary key of the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub fn parse(s: String) -> Result<Username, ValidationError> {
        let s = s.trim().to_owned();
        let forbidden_characters = ['/', '\\', '<', '>', '"', '\'', '(', ')', '{', '}'];
        if s.is_empty()
            || s.graphemes(true).count() > 64
            || s.chars().any(|c| c.is_whitespace() || forbidden_characters.contains(&c))
        {
            Err(ValidationError::InvalidUsername(s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
