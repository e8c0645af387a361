//! src/routes/register/post.rs

use crate::accounts::register_user;
use crate::domain::{
    NewUser, PersonName, PhoneNumber, UserEmail, UserPassword, Username, ValidationError,
};
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_redirect, see_other};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

#[derive(serde::Deserialize)]
pub struct RegisterFormData {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: Secret<String>,
    pub confirm_password: Secret<String>,
}

impl TryFrom<RegisterFormData> for NewUser {
    type Error = ValidationError;

    fn try_from(value: RegisterFormData) -> Result<Self, Self::Error> {
        let texts = [
            &value.username,
            &value.first_name,
            &value.last_name,
            &value.email,
            &value.phone_number,
        ];
        if texts.iter().any(|t| t.trim().is_empty())
            || value.password.expose_secret().is_empty()
            || value.confirm_password.expose_secret().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        let password = UserPassword::parse_confirmed(value.password, &value.confirm_password)?;
        let email = UserEmail::parse(value.email)?;
        let phone_number = PhoneNumber::parse(value.phone_number)?;
        Ok(Self {
            username: Username::parse(value.username)?,
            first_name: PersonName::parse(value.first_name)?,
            last_name: PersonName::parse(value.last_name)?,
            email,
            phone_number,
            password,
        })
    }
}

#[tracing::instrument(
    name = "Register a new user",
    skip(form, pool, session),
    fields(username = %form.username)
)]
pub async fn register(
    form: web::Form<RegisterFormData>,
    pool: web::Data<SqlitePool>,
    session: TypedSession,
) -> Result<HttpResponse, actix_web::Error> {
    let new_user: NewUser = form
        .0
        .try_into()
        .map_err(|e: ValidationError| flash_redirect(e.into(), Page::Register.path()))?;
    register_user(new_user, &pool)
        .await
        .map_err(|e| flash_redirect(e.into(), Page::Register.path()))?;
    session.update_state(|state| state.registered())?;
    FlashMessage::success("Registration successful!").send();
    Ok(see_other(Page::Login.path()))
}
