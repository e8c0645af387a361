//! src/dataset_cleanup_worker.rs

use crate::{configuration::Settings, dataset::DatasetStore, error::DeskResult};
use actix_web::web::Data;
use chrono::TimeDelta;
use std::time::Duration;

pub async fn run_cleanup_worker_until_stopped(
    configuration: Settings,
    store: Data<DatasetStore>,
) -> DeskResult<()> {
    worker_loop(
        store,
        TimeDelta::minutes(configuration.application.dataset_lifetime_minutes as i64),
        Duration::from_secs(configuration.application.dataset_cleanup_interval_seconds),
    )
    .await
}

async fn worker_loop(
    store: Data<DatasetStore>,
    lifetime: TimeDelta,
    interval: Duration,
) -> DeskResult<()> {
    loop {
        delete_idle_datasets(&store, lifetime);
        tokio::time::sleep(interval).await;
    }
}

/// Uploads of sessions that never logged out are dropped after `lifetime`.
#[tracing::instrument(skip(store))]
pub fn delete_idle_datasets(store: &DatasetStore, lifetime: TimeDelta) -> usize {
    let removed = store.remove_idle(lifetime);
    if removed > 0 {
        tracing::info!(removed, remaining = store.len(), "Deleted idle uploaded datasets");
    }
    removed
}
