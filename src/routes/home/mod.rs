//! src/routes/home/mod.rs

use crate::error::DeskResult;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::HttpResponse;

/// Send the session back to the page it is currently on.
pub async fn home(session: TypedSession) -> DeskResult<HttpResponse> {
    let state = session.get_state()?;
    Ok(see_other(state.page.path()))
}
