//! src/domain/new_user.rs

use crate::domain::{PersonName, PhoneNumber, UserEmail, UserPassword, Username};

/// Validated registration data.
#[derive(Debug)]
pub struct NewUser {
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: UserEmail,
    pub phone_number: PhoneNumber,
    pub password: UserPassword,
}

/// Validated profile changes; the password is only replaced if `Some`.
#[derive(Debug)]
pub struct UserUpdate {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: UserEmail,
    pub phone_number: PhoneNumber,
    pub password: Option<UserPassword>,
}
