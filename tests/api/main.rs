//! tests/api/main.rs

mod admin_panel;
mod dashboard;
mod health_check;
mod login;
mod profile;
mod register;
