//! src/utils.rs

use crate::error::Error;
use actix_web::{error::InternalError, http::header::LOCATION, HttpResponse, ResponseError};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};

/// forward to other location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Errors the user caused are flashed and answered with a redirect to
/// `location`; everything else becomes the generic error page.
pub fn flash_redirect(e: Error, location: &str) -> actix_web::Error {
    if e.status_code().is_server_error() {
        return e.into();
    }
    FlashMessage::error(e.to_string()).send();
    InternalError::from_response(e, see_other(location)).into()
}

/// Flash message prepared for rendering; `level` is used as css class.
pub struct FlashView {
    pub level: &'static str,
    pub content: String,
}

pub fn flash_views(flash_messages: &IncomingFlashMessages) -> Vec<FlashView> {
    flash_messages
        .iter()
        .map(|m| FlashView {
            level: match m.level() {
                Level::Error => "error",
                Level::Warning => "warning",
                Level::Success => "success",
                _ => "info",
            },
            content: m.content().to_string(),
        })
        .collect()
}
