//! src/configuration.rs

use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use std::path::PathBuf;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub admin: AdminSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub base_url: String,
    pub hmac_secret: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_upload_bytes: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub dataset_lifetime_minutes: u32,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub dataset_cleanup_interval_seconds: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub filename: PathBuf,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
    pub create_if_missing: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.filename)
            .create_if_missing(self.create_if_missing)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
    }
}

/// The admin credential pair lives outside of the users table.
#[derive(serde::Deserialize, Clone)]
pub struct AdminSettings {
    pub username: String,
    /// argon2 PHC string; if missing, the built-in default password is hashed at startup
    pub password_hash: Option<Secret<String>>,
}

impl AdminSettings {
    pub fn has_password_hash(&self) -> bool {
        self.password_hash
            .as_ref()
            .map(|h| !h.expose_secret().trim().is_empty())
            .unwrap_or(false)
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT.");
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.join("base.yaml"),
        ))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_APPLICATION__PORT=5001 would set `Settings.application.port`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        // the admin credential pair keeps its conventional variable names
        .set_override_option("admin.username", std::env::var("ADMIN_USERNAME").ok())?
        .set_override_option(
            "admin.password_hash",
            std::env::var("ADMIN_PASSWORD_HASH").ok(),
        )?
        .build()?;

    settings.try_deserialize::<Settings>()
}

/// The possible runtime environment for our application.
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. \
                Use either `local` or `production`.",
                other
            )),
        }
    }
}
