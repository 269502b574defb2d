use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Domain errors surfaced by the analysis pipeline and its gateways. Each
/// stage owns one kind; the HTTP boundary maps kinds to generic responses so
/// callers never see internal details.
#[derive(Debug, Error)]
pub enum Error {
    /// Page retrieval failed: unreachable host, transport error, or an empty
    /// response body.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// The performance audit call itself failed. Missing audit fields are not
    /// an error; they default the corresponding flags to false.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Request input rejected before the pipeline runs.
    #[error("validation error: {0}")]
    Validation(String),

    /// History storage failure.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Record id absent, or owned by a different caller.
    #[error("analysis not found")]
    NotFound,

    /// Missing or unrecognized bearer token.
    #[error("unauthorized")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable kind label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Fetch(_) => "fetch",
            Error::ExternalService(_) => "external_service",
            Error::Validation(_) => "validation",
            Error::Persistence(_) => "persistence",
            Error::NotFound => "not_found",
            Error::Unauthorized => "unauthorized",
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Persistence(err.to_string())
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Fetch(_) | Error::ExternalService(_) | Error::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Error::Validation(message) => json!({ "error": message }),
            Error::NotFound => json!({ "error": "Analysis not found" }),
            Error::Unauthorized => json!({ "error": "Unauthorized" }),
            // Pipeline failures collapse into one opaque message.
            _ => json!({ "error": "Analysis failed" }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::Validation("url is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::Fetch("timed out".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::ExternalService("503".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::Persistence("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pipeline_failures_are_opaque() {
        for err in [
            Error::Fetch("connection refused".into()),
            Error::ExternalService("audit call failed".into()),
            Error::Persistence("insert failed".into()),
        ] {
            let response = err.error_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
