//! Client-facing session endpoints.
//!
//! Deliberately minimal: open a session (which begins an execution context
//! the engine tracks) and commit it. This is just enough surface for work
//! to exist that the admin endpoints can observe and cancel.

use crate::error::ApiError;
use crate::models::{SessionOpenedResponse, StatusResponse};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use corvus_commons::SessionId;
use log::debug;

/// POST /v1/sessions - open a session bound to a fresh execution context
pub async fn open_session(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let ctx = state.engine.begin()?;
    let handle = match state.sessions.open(Some(ctx.clone())) {
        Ok(handle) => handle,
        Err(e) => {
            // The session never existed, so its context must not linger
            state.engine.finish(&ctx);
            return Err(e.into());
        }
    };
    debug!("session {} opened over {}", handle.id(), ctx.id());
    Ok(HttpResponse::Ok().json(SessionOpenedResponse {
        session_id: handle.id(),
    }))
}

/// POST /v1/sessions/{id}/commit - close the session and finish its context
///
/// A session that an administrator already terminated and released is gone
/// from the registry, so a late commit observes 404.
pub async fn commit_session(
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = SessionId::new(path.into_inner());
    let handle = state.sessions.close(id)?;
    if let Some(ctx) = handle.context() {
        state.engine.finish(&ctx);
    }
    debug!("session {} committed", id);
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}
