//! src/routes/login/post.rs

use crate::authentication::{validate_credentials, Credentials, CredentialsError};
use crate::error::Error;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{error::InternalError, web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

#[derive(serde::Deserialize)]
pub struct LoginFormData {
    pub username: String,
    pub password: Secret<String>,
}

impl LoginFormData {
    pub fn is_incomplete(&self) -> bool {
        self.username.trim().is_empty() || self.password.expose_secret().is_empty()
    }
}

#[tracing::instrument(
    skip(form, pool, session),
    fields(username=tracing::field::Empty)
)]
pub async fn login(
    form: web::Form<LoginFormData>,
    pool: web::Data<SqlitePool>,
    session: TypedSession,
) -> Result<HttpResponse, actix_web::Error> {
    if form.is_incomplete() {
        return Ok(failed_login(
            "Username and password are required.",
            Page::Login,
        ));
    }
    let credentials = Credentials {
        username: form.0.username,
        password: form.0.password,
    };
    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));
    match validate_credentials(credentials, &pool).await {
        Ok(username) => {
            session.renew();
            FlashMessage::success(format!("Welcome, {}!", username)).send();
            session.update_state(|state| state.logged_in(username))?;
            Ok(see_other(Page::Main.path()))
        }
        Err(CredentialsError::UnexpectedError(e)) => Err(Error::from(e).into()),
        Err(e) => {
            FlashMessage::error("Invalid username or password").send();
            Err(InternalError::from_response(Error::from(e), see_other(Page::Login.path())).into())
        }
    }
}

/// Flash `message` and go back to the login form of `page`.
pub fn failed_login(message: &str, page: Page) -> HttpResponse {
    FlashMessage::error(message.to_string()).send();
    see_other(page.path())
}
