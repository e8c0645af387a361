//! src/routes/app/dashboard/get.rs

use crate::authentication::AuthenticatedUser;
use crate::charts::PlotType;
use crate::dashboard::{build_report, DashboardOptions, DashboardReport, Figure};
use crate::dataset::{DatasetError, DatasetStore};
use crate::error::DeskResult;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::telemetry::spawn_blocking_with_tracing;
use crate::utils::{flash_views, FlashView};
use actix_web::{web, Responder, ResponseError};
use actix_web_flash_messages::IncomingFlashMessages;
use anyhow::Context;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    flash_messages: Vec<FlashView>,
    username: String,
    options: DashboardOptions,
    plot_types: [PlotType; 4],
    report: Option<DashboardReport>,
    error: Option<String>,
}

impl DashboardTemplate {
    fn is_selected_plot(&self, plot_type: &PlotType) -> bool {
        self.report
            .as_ref()
            .map(|r| r.plot_type == *plot_type)
            .unwrap_or(false)
    }
}

#[tracing::instrument(
    name = "Show dashboard",
    skip(flash_messages, session, store, options),
    fields(username = %*user)
)]
pub async fn dashboard(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
    user: web::ReqData<AuthenticatedUser>,
    store: web::Data<DatasetStore>,
    options: web::Query<DashboardOptions>,
) -> DeskResult<impl Responder> {
    session.navigate(Page::Main)?;
    let options = options.into_inner();
    let dataset_id = session.get_state()?.dataset_id;
    let upload = dataset_id.and_then(|dataset_id| store.get(&dataset_id));

    let (report, error) = match upload {
        // dropped by the cleanup worker
        None if dataset_id.is_some() => {
            session.update_state(|state| state.dataset_id = None)?;
            (None, Some(DatasetError::NotFound.to_string()))
        }
        Some(file) => {
            let report_options = options.clone();
            let report = spawn_blocking_with_tracing(move || build_report(&file, &report_options))
                .await
                .context("Failed to spawn dashboard pipeline.")?;
            match report {
                Ok(report) => (Some(report), None),
                Err(e) if !e.status_code().is_server_error() => (None, Some(e.to_string())),
                Err(e) => return Err(e),
            }
        }
        None => (None, None),
    };

    Ok(DashboardTemplate {
        flash_messages: flash_views(&flash_messages),
        username: user.to_string(),
        options,
        plot_types: PlotType::ALL,
        report,
        error,
    })
}
