//! src/routes/admin/login/mod.rs

mod get;
mod post;

pub use get::admin_login_form;
pub use post::*;
