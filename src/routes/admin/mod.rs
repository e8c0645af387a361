//! src/routes/admin/mod.rs

mod login;
mod users;

pub use login::*;
pub use users::*;
