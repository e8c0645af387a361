//! src/authentication/password.rs

use crate::error::error_chain_fmt;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

type CredsResult<T> = Result<T, CredentialsError>;

#[derive(thiserror::Error)]
pub enum CredentialsError {
    #[error("Username could not be found.")]
    UnknownUsername,
    #[error("Failed to verify password.")]
    InvalidPassword(#[source] argon2::password_hash::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

/// Returns the stored username if `credentials` match a registered account.
#[tracing::instrument(name = "Validate credentials", skip(credentials, pool))]
pub async fn validate_credentials(
    credentials: Credentials,
    pool: &SqlitePool,
) -> CredsResult<String> {
    let mut username: Option<String> = None;
    // unknown users get verified against a dummy hash to keep response times uniform
    let mut expected_password_hash = Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    );
    if let Some((stored_username, stored_password_hash)) =
        get_stored_credentials(&credentials.username, pool).await?
    {
        username = Some(stored_username);
        expected_password_hash = stored_password_hash;
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;
    // username is only set to Some, if we found credentials in database
    username.ok_or(CredentialsError::UnknownUsername)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
pub fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> CredsResult<()> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;
    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .map_err(CredentialsError::InvalidPassword)
}

#[tracing::instrument(name = "Get stored credentials", skip(username, pool))]
async fn get_stored_credentials(
    username: &str,
    pool: &SqlitePool,
) -> CredsResult<Option<(String, Secret<String>)>> {
    let row: Option<(String, String)> = sqlx::query_as(
        r#"
        SELECT username, password_hash
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?;
    Ok(row.map(|(username, hash)| (username, Secret::new(hash))))
}

/// Salted argon2id hash in PHC string format.
pub fn compute_password_hash(password: Secret<String>) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15_000, 2, 1, None)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Invalid argon2 parameters.")?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to hash password.")?
        .to_string();
    Ok(Secret::new(password_hash))
}
