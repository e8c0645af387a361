//! src/routes/app/profile/mod.rs

mod get;
mod post;

pub use get::profile_form;
pub use post::*;
