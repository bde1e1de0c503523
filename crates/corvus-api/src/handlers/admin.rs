//! Administrative endpoints: the four termination control plane operations.

use crate::error::ApiError;
use crate::models::{
    ContextCountResponse, SessionListResponse, StatusResponse, TerminateAllResponse,
};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use corvus_commons::SessionId;
use log::info;

/// GET /v1/admin/contexts/count - number of active execution contexts
///
/// Counts all engine-level work, embedded callers included. This population
/// intentionally differs from GET /v1/admin/sessions, which lists only
/// client-session-fronted work.
pub async fn context_count(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let count = state.control.active_count()?;
    Ok(HttpResponse::Ok().json(ContextCountResponse { count }))
}

/// GET /v1/admin/sessions - currently open client session ids
pub async fn list_sessions(state: web::Data<AppState>) -> HttpResponse {
    let mut sessions = state.control.active_session_ids();
    sessions.sort();
    HttpResponse::Ok().json(SessionListResponse { sessions })
}

/// POST /v1/admin/sessions/{id}/terminate - terminate one session
pub async fn terminate_session(
    path: web::Path<u64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let id = SessionId::new(path.into_inner());
    state.control.terminate_session(id)?;
    info!("admin terminated session {}", id);
    Ok(HttpResponse::Ok().json(StatusResponse::ok()))
}

/// POST /v1/admin/contexts/terminate - signal every active context
pub async fn terminate_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let signalled = state.control.terminate_all()?;
    info!("admin terminate_all signalled {} context(s)", signalled);
    Ok(HttpResponse::Ok().json(TerminateAllResponse { signalled }))
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_routes;
    use crate::state::AppState;
    use actix_web::{test, web, App};
    use corvus_core::{ExecutionTracker, SessionManager};
    use std::sync::Arc;

    fn app_state() -> (web::Data<AppState>, Arc<ExecutionTracker>, Arc<SessionManager>) {
        let engine = Arc::new(ExecutionTracker::new());
        let sessions = Arc::new(SessionManager::default());
        let state = web::Data::new(AppState::new(engine.clone(), sessions.clone()));
        (state, engine, sessions)
    }

    #[actix_web::test]
    async fn test_context_count_empty() {
        let (state, _engine, _sessions) = app_state();
        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get()
            .uri("/v1/admin/contexts/count")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn test_context_count_includes_embedded_work() {
        let (state, engine, sessions) = app_state();
        let _embedded = engine.begin().unwrap();
        let ctx = engine.begin().unwrap();
        let handle = sessions.open(Some(ctx)).unwrap();

        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get()
            .uri("/v1/admin/contexts/count")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 2);

        let req = test::TestRequest::get().uri("/v1/admin/sessions").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sessions"], serde_json::json!([handle.id().as_u64()]));
    }

    #[actix_web::test]
    async fn test_terminate_unknown_session_is_404() {
        let (state, _engine, _sessions) = app_state();
        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/v1/admin/sessions/99/terminate")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_terminate_session_then_again_is_404() {
        let (state, engine, sessions) = app_state();
        let ctx = engine.begin().unwrap();
        let handle = sessions.open(Some(ctx.clone())).unwrap();
        let uri = format!("/v1/admin/sessions/{}/terminate", handle.id());

        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert!(resp.status().is_success());
        assert!(ctx.is_cancelled());
        assert!(handle.is_released());

        let resp = test::call_service(&app, test::TestRequest::post().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_terminate_all_returns_signalled_count() {
        let (state, engine, _sessions) = app_state();
        let a = engine.begin().unwrap();
        let b = engine.begin().unwrap();

        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/v1/admin/contexts/terminate")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["signalled"], 2);
        assert!(a.is_cancelled());
        assert!(b.is_cancelled());
    }

    #[actix_web::test]
    async fn test_engine_shutdown_is_503() {
        let (state, engine, _sessions) = app_state();
        engine.shutdown();

        let app =
            test::init_service(App::new().app_data(state).configure(configure_routes)).await;

        let req = test::TestRequest::get()
            .uri("/v1/admin/contexts/count")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 503);
    }
}
