//! src/domain/mod.rs

mod new_user;
mod person_name;
mod phone_number;
mod user_email;
mod user_password;
mod username;

pub use new_user::{NewUser, UserUpdate};
pub use person_name::PersonName;
pub use phone_number::PhoneNumber;
pub use user_email::UserEmail;
pub use user_password::UserPassword;
pub use username::Username;

/// Validation error for domain data
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Invalid email address.")]
    InvalidEmail(String),
    #[error("Invalid phone number.")]
    InvalidPhone(String),
    #[error("`{0}` is not a valid username.")]
    InvalidUsername(String),
    #[error("`{0}` is not a valid name.")]
    InvalidName(String),
    #[error("The password must be between 8 and 128 characters long.")]
    InvalidPassword,
}
