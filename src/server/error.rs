use crate::domain::error::DomainError;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Request-boundary error: every failure becomes a status code plus a
/// `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        ApiError(DomainError::InvalidInput(format!("Malformed upload: {e}")))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError(DomainError::InvalidInput(e.body_text()))
    }
}

impl From<FormRejection> for ApiError {
    fn from(e: FormRejection) -> Self {
        ApiError(DomainError::InvalidInput(e.body_text()))
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            DomainError::InvalidInput(_) | DomainError::Parse(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Retrieval(_) | DomainError::Embedding(_) | DomainError::Llm(_) => {
                StatusCode::BAD_GATEWAY
            }
            DomainError::Configuration(_) | DomainError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(error = %self.0, "request rejected");
        }
        let detail = match &self.0 {
            DomainError::InvalidInput(msg) | DomainError::NotFound(msg) => msg.clone(),
            other => other.to_string(),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::Parse("x".into()), StatusCode::BAD_REQUEST),
            (DomainError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (DomainError::Retrieval("x".into()), StatusCode::BAD_GATEWAY),
            (DomainError::Llm("x".into()), StatusCode::BAD_GATEWAY),
            (DomainError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError(err).status(), status);
        }
    }
}
