use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every failure a route can surface. Clients only ever see the status code
/// and the fixed message, never the underlying cause.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request")]
    BadRequest,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("unprocessable")]
    Unprocessable,
    #[error("internal server error")]
    Internal,
}

pub type ApiResponse<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Logs a failed database call and replaces it with `kind`.
pub fn db_failure(kind: ApiError) -> impl FnOnce(sqlx::Error) -> ApiError {
    move |error| {
        tracing::error!(%error, status = %kind.status(), "Database call failed");
        kind
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        ApiError::BadRequest
    }
}

// An id that is not an integer can not name any resource.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "Rejected path");
        ApiError::NotFound
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "Rejected query string");
        ApiError::BadRequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn error_body_carries_status_and_fixed_message() {
        let response = ApiError::Unprocessable.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": 422, "message": "unprocessable"})
        );
    }

    #[test]
    fn messages_match_statuses() {
        let cases = [
            (ApiError::BadRequest, 400, "bad request"),
            (ApiError::NotFound, 404, "resource not found"),
            (ApiError::MethodNotAllowed, 405, "method not allowed"),
            (ApiError::Unprocessable, 422, "unprocessable"),
        ];
        for (error, code, message) in cases {
            assert_eq!(error.status().as_u16(), code);
            assert_eq!(error.to_string(), message);
        }
    }
}
