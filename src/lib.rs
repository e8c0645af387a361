//! src/lib.rs

pub mod accounts;
pub mod authentication;
pub mod charts;
pub mod configuration;
pub mod dashboard;
pub mod dataset;
pub mod dataset_cleanup_worker;
pub mod domain;
pub mod error;
pub mod page;
pub mod routes;
pub mod session_state;
pub mod startup;
pub mod telemetry;
pub mod utils;
