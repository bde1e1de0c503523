//! HTTP error mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use corvus_core::{EngineError, SessionError, TerminationError};
use thiserror::Error;

/// Wrapper turning core errors into HTTP responses.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Termination(#[from] TerminationError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Termination(TerminationError::NotFound(_))
            | ApiError::Session(SessionError::NotFound(_)) => "NOT_FOUND",
            ApiError::Termination(TerminationError::Failed { .. }) => "TERMINATION_FAILED",
            ApiError::Session(SessionError::AlreadyReleased(_))
            | ApiError::Session(SessionError::TerminationInProgress(_)) => "SESSION_CLOSED",
            ApiError::Session(SessionError::LimitReached(_)) => "SESSION_LIMIT",
            ApiError::Termination(TerminationError::Engine(_)) | ApiError::Engine(_) => {
                "ENGINE_UNAVAILABLE"
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Termination(TerminationError::NotFound(_))
            | ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Termination(TerminationError::Failed { .. })
            | ApiError::Session(SessionError::AlreadyReleased(_))
            | ApiError::Session(SessionError::TerminationInProgress(_)) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::LimitReached(_)) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Termination(TerminationError::Engine(_)) | ApiError::Engine(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = serde_json::json!({
            "status": "error",
            "error": {
                "code": self.error_code(),
                "message": self.to_string()
            }
        });
        HttpResponse::build(self.status_code())
            .content_type("application/json")
            .json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvus_commons::SessionId;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError::from(TerminationError::NotFound(SessionId::new(1)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_failed_maps_to_409() {
        let err = ApiError::from(TerminationError::Failed {
            id: SessionId::new(1),
            reason: "raced".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_engine_unavailable_maps_to_503() {
        let err = ApiError::from(EngineError::Unavailable("down".to_string()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), "ENGINE_UNAVAILABLE");
    }

    #[test]
    fn test_limit_maps_to_429() {
        let err = ApiError::from(SessionError::LimitReached(10));
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}
