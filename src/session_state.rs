//! src/session_state.rs

use crate::error::{error_chain_fmt, DeskResult, Error};
use crate::page::{Page, SessionState};
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};

#[derive(thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    SessionInsertError(#[from] actix_session::SessionInsertError),
    #[error(transparent)]
    SessionGetError(#[from] actix_session::SessionGetError),
}

impl std::fmt::Debug for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct TypedSession(Session);

impl TypedSession {
    const STATE_KEY: &'static str = "state";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn get_state(&self) -> DeskResult<SessionState> {
        let state = self
            .0
            .get::<SessionState>(Self::STATE_KEY)
            .map_err(SessionError::from)?;
        Ok(state.unwrap_or_default())
    }

    pub fn insert_state(&self, state: &SessionState) -> DeskResult<()> {
        self.0
            .insert(Self::STATE_KEY, state)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    /// Load the state, apply `f` and store the result.
    pub fn update_state<T>(&self, f: impl FnOnce(&mut SessionState) -> T) -> DeskResult<T> {
        let mut state = self.get_state()?;
        let output = f(&mut state);
        self.insert_state(&state)?;
        Ok(output)
    }

    /// Record `page` as the page the session is currently on.
    pub fn navigate(&self, page: Page) -> DeskResult<()> {
        self.update_state(|state| state.navigate(page))
    }

    /// Clear all flags under a fresh session key, keeping the session on
    /// the login page. Returns the dataset the session owned.
    pub fn log_out(&self) -> DeskResult<Option<uuid::Uuid>> {
        let mut state = self.get_state()?;
        let dataset_id = state.logged_out();
        self.0.clear();
        self.0.renew();
        self.insert_state(&state)?;
        Ok(dataset_id)
    }
}

impl FromRequest for TypedSession {
    // This is a complicated way of saying
    // "We return the same error returned by the
    // implementation of 'FromRequest' for 'Session'".
    type Error = <Session as FromRequest>::Error;
    // We do not perform any I/O, so we wrap `TypedSession` into `Ready`
    // to convert it into a `Future` that resolves to the wrapped value
    // the first time it's polled by the executor.
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
