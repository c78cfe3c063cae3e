use actix_web::http::StatusCode;
use actix_web::{error::BlockingError, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

/// Error kinds surfaced over HTTP, each with a fixed status code
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("RAG system not initialized")]
    BackendUnavailable,

    #[error("{0}")]
    InternalFailure(String),

    #[error("Endpoint not found")]
    NotFound,
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::InvalidInput(format!("Missing required field: {}", field))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }
        HttpResponse::build(status).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

impl From<decoplan_core::Error> for ApiError {
    fn from(e: decoplan_core::Error) -> Self {
        ApiError::InternalFailure(e.to_string())
    }
}

impl From<BlockingError> for ApiError {
    fn from(e: BlockingError) -> Self {
        ApiError::InternalFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::missing_field("query").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::BackendUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            ApiError::InternalFailure("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: ApiError = decoplan_core::Error::Retrieval("index offline".into()).into();
        assert_eq!(err.to_string(), "Retrieval failed: index offline");
    }
}
