//! src/routes/admin/login/get.rs

use crate::error::DeskResult;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_views, FlashView};
use actix_web::Responder;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "admin_login.html")]
struct AdminLoginTemplate {
    flash_messages: Vec<FlashView>,
}

pub async fn admin_login_form(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
) -> DeskResult<impl Responder> {
    session.navigate(Page::AdminLogin)?;
    Ok(AdminLoginTemplate {
        flash_messages: flash_views(&flash_messages),
    })
}
