//! src/routes/admin/users/post.rs

use super::admin_panel_path;
use crate::accounts::{delete_user, update_user, AccountError};
use crate::domain::{UserUpdate, ValidationError};
use crate::page::Page;
use crate::routes::ProfileFormData;
use crate::utils::{flash_redirect, see_other};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use sqlx::SqlitePool;

#[derive(serde::Deserialize)]
pub struct AdminUserFormData {
    pub username: String,
    #[serde(flatten)]
    pub profile: ProfileFormData,
}

#[derive(serde::Deserialize)]
pub struct AdminDeleteFormData {
    pub username: String,
}

#[tracing::instrument(
    name = "Admin updates user",
    skip(form, pool),
    fields(username = %form.username)
)]
pub async fn admin_update_user(
    form: web::Form<AdminUserFormData>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, actix_web::Error> {
    let AdminUserFormData { username, profile } = form.into_inner();
    let back = admin_panel_path(&username);
    let update: UserUpdate = profile
        .try_into()
        .map_err(|e: ValidationError| flash_redirect(e.into(), &back))?;
    update_user(&username, update, &pool)
        .await
        .map_err(|e| flash_redirect(e.into(), &back))?;
    FlashMessage::success("User updated successfully!").send();
    Ok(see_other(&back))
}

#[tracing::instrument(
    name = "Admin deletes user",
    skip(form, pool),
    fields(username = %form.username)
)]
pub async fn admin_delete_user(
    form: web::Form<AdminDeleteFormData>,
    pool: web::Data<SqlitePool>,
) -> Result<HttpResponse, actix_web::Error> {
    match delete_user(&form.username, &pool).await {
        Ok(()) => {
            FlashMessage::success("User deleted successfully!").send();
            Ok(see_other(Page::AdminPanel.path()))
        }
        Err(e @ AccountError::UserNotFound(_)) => {
            Err(flash_redirect(e.into(), Page::AdminPanel.path()))
        }
        Err(e) => Err(flash_redirect(e.into(), &admin_panel_path(&form.username))),
    }
}
