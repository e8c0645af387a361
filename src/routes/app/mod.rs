//! src/routes/app/mod.rs

mod dashboard;
mod profile;

pub use dashboard::*;
pub use profile::*;
