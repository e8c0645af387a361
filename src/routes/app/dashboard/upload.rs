//! src/routes/app/dashboard/upload.rs

use crate::dataset::{read_file, DatasetStore, FileKind};
use crate::error::Error;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::{flash_redirect, see_other};
use actix_multipart::form::{bytes::Bytes, MultipartForm};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;

#[derive(MultipartForm)]
pub struct UploadForm {
    pub file: Bytes,
}

#[tracing::instrument(
    name = "Upload dataset",
    skip(form, session, store),
    fields(file_name = tracing::field::Empty, size = tracing::field::Empty)
)]
pub async fn upload_dataset(
    MultipartForm(form): MultipartForm<UploadForm>,
    session: TypedSession,
    store: web::Data<DatasetStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let file_name = form.file.file_name.unwrap_or_default();
    let data = form.file.data;
    tracing::Span::current()
        .record("file_name", &tracing::field::display(&file_name))
        .record("size", data.len());
    let back = Page::Main.path();
    FileKind::from_file_name(&file_name).map_err(|e| flash_redirect(e.into(), back))?;

    // parse once, so broken files are rejected right away
    let (name, bytes) = (file_name.clone(), data.clone());
    spawn_blocking_with_tracing(move || read_file(&name, &bytes))
        .await
        .context("Failed to spawn parsing of the uploaded file.")
        .map_err(Error::from)?
        .map_err(|e| flash_redirect(e.into(), back))?;

    let dataset_id = store.insert(file_name.clone(), data);
    let replaced = session.update_state(|state| state.dataset_id.replace(dataset_id))?;
    if let Some(replaced) = replaced {
        store.remove(&replaced);
    }
    FlashMessage::info(format!("Uploaded {}.", file_name)).send();
    Ok(see_other(back))
}
