//! src/authentication/middleware.rs

use crate::page::{Guard, Page, SessionState};
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    FromRequest, HttpMessage,
};
use actix_web_flash_messages::FlashMessage;
use actix_web_lab::middleware::Next;
use std::ops::Deref;

/// Username of the logged in user, attached to the request by `reject_anonymous_users`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(String);

impl std::fmt::Display for AuthenticatedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for AuthenticatedUser {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let state = session_state(&mut req).await?;
    match (state.guard(Page::Main), state.username) {
        (Guard::Allow, Some(username)) => {
            req.extensions_mut().insert(AuthenticatedUser(username));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        _ => {
            FlashMessage::warning("You need to be logged in to access this page.").send();
            Ok(req
                .into_response(see_other(Page::Login.path()))
                .map_into_right_body())
        }
    }
}

pub async fn reject_non_admin_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<EitherBody<impl MessageBody>>, actix_web::Error> {
    let state = session_state(&mut req).await?;
    match state.guard(Page::AdminPanel) {
        Guard::Allow => next.call(req).await.map(ServiceResponse::map_into_left_body),
        Guard::Redirect(page) => {
            FlashMessage::warning("You need to be logged in as an admin to access this page.")
                .send();
            Ok(req
                .into_response(see_other(page.path()))
                .map_into_right_body())
        }
    }
}

async fn session_state(req: &mut ServiceRequest) -> Result<SessionState, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;
    Ok(session.get_state()?)
}
