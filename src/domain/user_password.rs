//! src/domain/user_password.rs

use crate::domain::ValidationError;
use secrecy::{ExposeSecret, Secret};

/// Plain text password candidate which satisfies the password policy.
#[derive(Debug, Clone)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(password: Secret<String>) -> Result<UserPassword, ValidationError> {
        let length = password.expose_secret().chars().count();
        if !(8..=128).contains(&length) {
            return Err(ValidationError::InvalidPassword);
        }
        Ok(Self(password))
    }

    /// Parse `password` after checking it against its confirmation field.
    pub fn parse_confirmed(
        password: Secret<String>,
        confirmation: &Secret<String>,
    ) -> Result<UserPassword, ValidationError> {
        if password.expose_secret() != confirmation.expose_secret() {
            return Err(ValidationError::PasswordMismatch);
        }
        Self::parse(password)
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
