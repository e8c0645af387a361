//! src/routes/app/profile/get.rs

use crate::accounts::{get_user, UserRecord};
use crate::authentication::AuthenticatedUser;
use crate::page::Page;
use crate::session_state::TypedSession;
use crate::utils::{flash_views, see_other, FlashView};
use actix_web::{web, Either, HttpResponse, Responder};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama_actix::Template;
use sqlx::SqlitePool;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    flash_messages: Vec<FlashView>,
    user: UserRecord,
}

#[tracing::instrument(name = "Show profile", skip(flash_messages, session, pool))]
pub async fn profile_form(
    flash_messages: IncomingFlashMessages,
    session: TypedSession,
    user: web::ReqData<AuthenticatedUser>,
    pool: web::Data<SqlitePool>,
) -> Result<Either<impl Responder, HttpResponse>, actix_web::Error> {
    session.navigate(Page::EditProfile)?;
    let Some(user) = get_user(&user, &pool).await.map_err(crate::error::Error::from)? else {
        FlashMessage::error("User not found.").send();
        return Ok(Either::Right(see_other(Page::Main.path())));
    };
    Ok(Either::Left(ProfileTemplate {
        flash_messages: flash_views(&flash_messages),
        user,
    }))
}
