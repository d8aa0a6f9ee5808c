use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("authentication required")]
    Unauthorized,
    #[error("administrator role required")]
    Forbidden,
    #[error("{0}")]
    BadRequest(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Service(e) => match e {
                ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                ServiceError::Link(_) => (StatusCode::BAD_REQUEST, "link_error"),
                ServiceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
                ServiceError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
                ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
                ServiceError::Db(_) | ServiceError::Hash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            },
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status.is_server_error() {
            error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            debug!(status = status.as_u16(), error = %self, "request rejected");
            self.to_string()
        };

        let mut resp = (status, Json(ErrorBody { error: code.to_string(), message })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            resp.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(r#"Basic realm="Restricted""#));
        }
        resp
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(e: PathRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::BadRequest(e.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::validation::ValidationError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ApiError::from(ServiceError::Validation(ValidationError::EmptyFilmName)), StatusCode::BAD_REQUEST),
            (ApiError::from(ServiceError::NotFound("film".into())), StatusCode::NOT_FOUND),
            (ApiError::from(ServiceError::Unauthorized), StatusCode::UNAUTHORIZED),
            (ApiError::from(ServiceError::Db("boom".into())), StatusCode::INTERNAL_SERVER_ERROR),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn unauthorized_carries_challenge() {
        let resp = ApiError::Unauthorized.into_response();
        assert_eq!(resp.headers()[header::WWW_AUTHENTICATE], r#"Basic realm="Restricted""#);
    }
}
