//! API routes configuration
//!
//! All endpoints use the /v1 version prefix:
//! - GET  /v1/admin/contexts/count        - active execution context count
//! - POST /v1/admin/contexts/terminate    - signal every active context
//! - GET  /v1/admin/sessions              - open client session ids
//! - POST /v1/admin/sessions/{id}/terminate - terminate one session
//! - POST /v1/sessions                    - open a session
//! - POST /v1/sessions/{id}/commit        - commit and close a session
//! - GET  /v1/healthz                     - liveness probe

use crate::handlers::{admin, session};
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Configure API routes for CorvusDB
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .service(
                web::scope("/admin")
                    .route("/contexts/count", web::get().to(admin::context_count))
                    .route("/contexts/terminate", web::post().to(admin::terminate_all))
                    .route("/sessions", web::get().to(admin::list_sessions))
                    .route(
                        "/sessions/{id}/terminate",
                        web::post().to(admin::terminate_session),
                    ),
            )
            .service(
                web::scope("/sessions")
                    .route("", web::post().to(session::open_session))
                    .route("/{id}/commit", web::post().to(session::commit_session)),
            )
            .route("/healthz", web::get().to(healthz_handler)),
    );
}

/// Liveness probe; no authentication, no registry access
async fn healthz_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1"
    }))
}
