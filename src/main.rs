//! main.rs

use datadesk::configuration::get_configuration;
use datadesk::dataset_cleanup_worker::run_cleanup_worker_until_stopped;
use datadesk::error::DeskResult;
use datadesk::startup::Application;
use datadesk::telemetry::{get_subscriber, init_subscriber};
use std::fmt::{Debug, Display};
use tokio::task::JoinError;

#[tokio::main]
async fn main() -> DeskResult<()> {
    let subscriber = get_subscriber("datadesk".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Panic if we can't read configuration
    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration.clone()).await?;
    let dataset_store = application.dataset_store();
    let application_task = tokio::spawn(application.run_until_stopped());
    let cleanup_datasets = tokio::spawn(run_cleanup_worker_until_stopped(
        configuration,
        dataset_store,
    ));

    tokio::select! {
        o = application_task => report_exit("API", o),
        o = cleanup_datasets => report_exit("Background cleanup of uploaded datasets", o),
    };

    Ok(())
}

fn report_exit(task_name: &str, outcome: Result<Result<(), impl Debug + Display>, JoinError>) {
    match outcome {
        Ok(Ok(())) => {
            tracing::info!("{} has exited", task_name)
        }
        Ok(Err(e)) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} failed",
                task_name
            )
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "{} task failed to complete",
                task_name
            )
        }
    }
}
