//! src/routes/login/get.rs

use crate::error::DeskResult;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_views, FlashView};
use actix_web::Responder;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    flash_messages: Vec<FlashView>,
}

pub async fn login_form(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
) -> DeskResult<impl Responder> {
    session.navigate(Page::Login)?;
    Ok(LoginTemplate {
        flash_messages: flash_views(&flash_messages),
    })
}
