//! src/accounts.rs

use crate::authentication::compute_password_hash;
use crate::domain::{NewUser, UserUpdate, ValidationError};
use crate::error::error_chain_fmt;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::{Sqlite, SqlitePool, Transaction};

#[derive(thiserror::Error)]
pub enum AccountError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),
    #[error("Username, email, or phone number already in use.")]
    AlreadyTaken,
    #[error("User `{0}` not found.")]
    UserNotFound(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

type AccountResult<T> = Result<T, AccountError>;

/// Stored account without its password hash.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}

/// Checks if err results from violating one of the UNIQUE constraints of `users`
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

async fn hash_in_background(password: Secret<String>) -> AccountResult<Secret<String>> {
    let hash = spawn_blocking_with_tracing(move || compute_password_hash(password))
        .await
        .context("Failed to spawn computation of password hash")??;
    Ok(hash)
}

#[tracing::instrument(
    name = "Registering a new user",
    skip(new_user, pool),
    fields(username = %new_user.username)
)]
pub async fn register_user(new_user: NewUser, pool: &SqlitePool) -> AccountResult<()> {
    let password_hash = hash_in_background(new_user.password.clone().into_secret()).await?;
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a database connection from the pool")?;
    if user_exists(&mut transaction, &new_user).await? {
        return Err(AccountError::AlreadyTaken);
    }
    insert_user(&mut transaction, &new_user, &password_hash).await?;
    transaction
        .commit()
        .await
        .context("Failed to commit SQL transaction to store a new user.")?;
    Ok(())
}

#[tracing::instrument(name = "Check for existing user", skip_all)]
async fn user_exists(
    transaction: &mut Transaction<'_, Sqlite>,
    new_user: &NewUser,
) -> AccountResult<bool> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM users
        WHERE username = ? OR email = ? OR phone_number = ?
        "#,
    )
    .bind(new_user.username.as_ref())
    .bind(new_user.email.as_ref())
    .bind(new_user.phone_number.as_ref())
    .fetch_one(&mut **transaction)
    .await
    .context("Failed to check for existing users.")?;
    Ok(count > 0)
}

#[tracing::instrument(name = "Saving new user details in the database", skip_all)]
async fn insert_user(
    transaction: &mut Transaction<'_, Sqlite>,
    new_user: &NewUser,
    password_hash: &Secret<String>,
) -> AccountResult<()> {
    let query = sqlx::query(
        r#"
        INSERT INTO users (username, first_name, last_name, email, phone_number, password_hash)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new_user.username.as_ref())
    .bind(new_user.first_name.as_ref())
    .bind(new_user.last_name.as_ref())
    .bind(new_user.email.as_ref())
    .bind(new_user.phone_number.as_ref())
    .bind(password_hash.expose_secret());
    match query.execute(&mut **transaction).await {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AccountError::AlreadyTaken),
        Err(e) => Err(anyhow::Error::new(e)
            .context("Failed to insert new user in the database.")
            .into()),
    }
}

#[tracing::instrument(name = "List all users", skip(pool))]
pub async fn list_users(pool: &SqlitePool) -> AccountResult<Vec<UserRecord>> {
    let users = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT username, first_name, last_name, email, phone_number
        FROM users
        ORDER BY username
        "#,
    )
    .fetch_all(pool)
    .await
    .context("Failed to read all users from the database.")?;
    Ok(users)
}

#[tracing::instrument(name = "Get user", skip(pool))]
pub async fn get_user(username: &str, pool: &SqlitePool) -> AccountResult<Option<UserRecord>> {
    let user = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT username, first_name, last_name, email, phone_number
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to read user from the database.")?;
    Ok(user)
}

/// Update the profile fields of `username`. The stored password hash is only
/// replaced if `update.password` is set.
#[tracing::instrument(name = "Update user", skip(update, pool))]
pub async fn update_user(
    username: &str,
    update: UserUpdate,
    pool: &SqlitePool,
) -> AccountResult<()> {
    let result = match update.password {
        Some(password) => {
            let password_hash = hash_in_background(password.into_secret()).await?;
            sqlx::query(
                r#"
                UPDATE users
                SET first_name = ?, last_name = ?, email = ?, phone_number = ?, password_hash = ?
                WHERE username = ?
                "#,
            )
            .bind(update.first_name.as_ref())
            .bind(update.last_name.as_ref())
            .bind(update.email.as_ref())
            .bind(update.phone_number.as_ref())
            .bind(password_hash.expose_secret().to_owned())
            .bind(username)
            .execute(pool)
            .await
        }
        None => {
            sqlx::query(
                r#"
                UPDATE users
                SET first_name = ?, last_name = ?, email = ?, phone_number = ?
                WHERE username = ?
                "#,
            )
            .bind(update.first_name.as_ref())
            .bind(update.last_name.as_ref())
            .bind(update.email.as_ref())
            .bind(update.phone_number.as_ref())
            .bind(username)
            .execute(pool)
            .await
        }
    };
    match result {
        Ok(done) if done.rows_affected() == 0 => Err(AccountError::UserNotFound(username.into())),
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation(&e) => Err(AccountError::AlreadyTaken),
        Err(e) => Err(anyhow::Error::new(e)
            .context("Failed to update user in the database.")
            .into()),
    }
}

#[tracing::instrument(name = "Delete user", skip(pool))]
pub async fn delete_user(username: &str, pool: &SqlitePool) -> AccountResult<()> {
    let result = sqlx::query("DELETE FROM users WHERE username = ?")
        .bind(username)
        .execute(pool)
        .await
        .context("Failed to delete user from the database.")?;
    if result.rows_affected() == 0 {
        return Err(AccountError::UserNotFound(username.into()));
    }
    Ok(())
}
