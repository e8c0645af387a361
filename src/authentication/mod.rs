//! src/authentication/mod.rs

mod admin;
mod middleware;
mod password;

pub use admin::AdminCredentials;
pub use middleware::{reject_anonymous_users, reject_non_admin_users, AuthenticatedUser};
pub use password::{
    compute_password_hash, validate_credentials, verify_password_hash, Credentials,
    CredentialsError,
};
