//! src/routes/app/profile/post.rs

use crate::accounts::update_user;
use crate::authentication::AuthenticatedUser;
use crate::domain::{PersonName, PhoneNumber, UserEmail, UserPassword, UserUpdate, ValidationError};
use crate::page::Page;
use crate::utils::{flash_redirect, see_other};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::{ExposeSecret, Secret};
use sqlx::SqlitePool;

/// Editable account fields; blank passwords keep the current one.
#[derive(serde::Deserialize)]
pub struct ProfileFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub new_password: Secret<String>,
    pub confirm_password: Secret<String>,
}

impl TryFrom<ProfileFormData> for UserUpdate {
    type Error = ValidationError;

    fn try_from(value: ProfileFormData) -> Result<Self, Self::Error> {
        let texts = [
            &value.first_name,
            &value.last_name,
            &value.email,
            &value.phone_number,
        ];
        if texts.iter().any(|t| t.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }
        let password = if value.new_password.expose_secret().is_empty()
            && value.confirm_password.expose_secret().is_empty()
        {
            None
        } else {
            Some(UserPassword::parse_confirmed(
                value.new_password,
                &value.confirm_password,
            )?)
        };
        let email = UserEmail::parse(value.email)?;
        let phone_number = PhoneNumber::parse(value.phone_number)?;
        Ok(Self {
            first_name: PersonName::parse(value.first_name)?,
            last_name: PersonName::parse(value.last_name)?,
            email,
            phone_number,
            password,
        })
    }
}

#[tracing::instrument(name = "Save profile", skip(form, pool))]
pub async fn save_profile(
    form: web::Form<ProfileFormData>,
    user: web::ReqData<AuthenticatedUser>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, actix_web::Error> {
    let update: UserUpdate = form
        .0
        .try_into()
        .map_err(|e: ValidationError| flash_redirect(e.into(), Page::EditProfile.path()))?;
    update_user(&user, update, &pool)
        .await
        .map_err(|e| flash_redirect(e.into(), Page::EditProfile.path()))?;
    FlashMessage::success("User updated successfully!").send();
    Ok(see_other(Page::EditProfile.path()))
}
