//! src/authentication/admin.rs

use crate::authentication::{compute_password_hash, verify_password_hash};
use crate::configuration::AdminSettings;
use crate::telemetry::spawn_blocking_with_tracing;
use secrecy::{ExposeSecret, Secret};

/// Used when no admin hash is configured. Real deployments must override it.
const DEFAULT_ADMIN_PASSWORD: &str = "admin-password";

/// The privileged credential pair, independent of the users table.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Secret<String>,
}

impl AdminCredentials {
    pub fn new(username: String, password_hash: Secret<String>) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    /// Build from settings, hashing the default password if no hash is configured.
    pub fn from_settings(settings: &AdminSettings) -> Result<Self, anyhow::Error> {
        let password_hash = match &settings.password_hash {
            Some(hash) if settings.has_password_hash() => hash.clone(),
            _ => {
                tracing::warn!(
                    admin.username = %settings.username,
                    "No admin password hash configured, falling back to the default admin password."
                );
                compute_password_hash(Secret::new(DEFAULT_ADMIN_PASSWORD.to_string()))?
            }
        };
        Ok(Self::new(settings.username.clone(), password_hash))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    #[tracing::instrument(name = "Check admin credentials", skip(self, password))]
    pub async fn is_admin(&self, username: &str, password: Secret<String>) -> bool {
        // always verify, so a wrong username costs the same as a wrong password
        let expected_password_hash = self.password_hash.clone();
        let verified = spawn_blocking_with_tracing(move || {
            verify_password_hash(expected_password_hash, password)
        })
        .await;
        let password_matches = match verified {
            Ok(Ok(())) => true,
            Ok(Err(_)) => false,
            Err(e) => {
                tracing::error!(error.message = %e, "Failed to verify admin password");
                false
            }
        };
        password_matches && username == self.username
    }

    #[cfg(test)]
    fn expose_hash(&self) -> &str {
        self.password_hash.expose_secret()
    }
}
