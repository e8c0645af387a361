//! src/routes/app/dashboard/mod.rs

mod get;
mod upload;

pub use get::dashboard;
pub use upload::*;
