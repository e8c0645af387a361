//! src/routes/register/get.rs

use crate::error::DeskResult;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_views, FlashView};
use actix_web::Responder;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate {
    flash_messages: Vec<FlashView>,
}

pub async fn register_form(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
) -> DeskResult<impl Responder> {
    session.navigate(Page::Register)?;
    Ok(RegisterTemplate {
        flash_messages: flash_views(&flash_messages),
    })
}
