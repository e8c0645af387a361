//! src/routes/mod.rs

mod admin;
mod app;
mod health_check;
mod home;
mod login;
mod logout;
mod register;

pub use admin::*;
pub use app::*;
pub use health_check::*;
pub use home::*;
pub use login::*;
pub use logout::*;
pub use register::*;
