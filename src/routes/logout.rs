//! src/routes/logout.rs

use crate::dataset::DatasetStore;
use crate::error::DeskResult;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

#[tracing::instrument(name = "Log out", skip(session, store))]
pub async fn log_out(
    session: TypedSession,
    store: web::Data<DatasetStore>,
) -> DeskResult<HttpResponse> {
    if let Some(dataset_id) = session.log_out()? {
        store.remove(&dataset_id);
    }
    FlashMessage::info("You have successfully logged out.").send();
    Ok(see_other(Page::Login.path()))
}
