//! src/routes/admin/users/get.rs

use crate::accounts::{list_users, UserRecord};
use crate::error::{DeskResult, Error};
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_views, FlashView};
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;
use sqlx::SqlitePool;

#[derive(serde::Deserialize, Debug)]
pub struct AdminPanelQuery {
    pub username: Option<String>,
    #[serde(default)]
    pub confirm_delete: bool,
}

#[derive(Template)]
#[template(path = "admin_panel.html")]
struct AdminPanelTemplate {
    flash_messages: Vec<FlashView>,
    users: Vec<UserRecord>,
    selected: Option<UserRecord>,
    confirm_delete: bool,
}

/// Link to the admin panel with `username` selected.
pub fn admin_panel_path(username: &str) -> String {
    format!(
        "{}?username={}",
        Page::AdminPanel.path(),
        urlencoding::encode(username)
    )
}

#[tracing::instrument(name = "Show admin panel", skip(flash_messages, session, pool))]
pub async fn admin_panel(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
    query: web::Query<AdminPanelQuery>,
    pool: web::Data<SqlitePool>,
) -> DeskResult<impl Responder> {
    session.navigate(Page::AdminPanel)?;
    let users = list_users(&pool).await.map_err(Error::from)?;
    let query = query.into_inner();
    let selected = query
        .username
        .as_deref()
        .and_then(|username| users.iter().find(|u| u.username == username))
        .or_else(|| users.first())
        .cloned();
    let confirm_delete = query.confirm_delete && selected.is_some();
    Ok(AdminPanelTemplate {
        flash_messages: flash_views(&flash_messages),
        users,
        selected,
        confirm_delete,
    })
}
