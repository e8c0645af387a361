//! src/routes/admin/login/post.rs

use crate::authentication::AdminCredentials;
use crate::error::DeskResult;
use crate::page::Page;
use crate::routes::{failed_login, LoginFormData};
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{web, HttpResponse};

#[tracing::instrument(
    skip(form, admin, session),
    fields(username = %form.username)
)]
pub async fn admin_login(
    form: web::Form<LoginFormData>,
    admin: web::Data<AdminCredentials>,
    session: TypedSession,
) -> DeskResult<HttpResponse> {
    if form.is_incomplete() {
        return Ok(failed_login(
            "Username and password are required.",
            Page::AdminLogin,
        ));
    }
    let form = form.into_inner();
    if !admin.is_admin(&form.username, form.password).await {
        tracing::warn!("Rejected admin login");
        return Ok(failed_login(
            "Invalid admin username or password",
            Page::AdminLogin,
        ));
    }
    session.renew();
    session.update_state(|state| state.admin_logged_in())?;
    Ok(see_other(Page::AdminPanel.path()))
}
