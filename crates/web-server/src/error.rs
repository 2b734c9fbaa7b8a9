use crate::dto::ResponseDto;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// The request could not be parsed (body, path or query).
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response with the standard envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Service(ServiceError::NotFound(_) | ServiceError::NoData(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Service(ServiceError::Storage(db_err)) => {
                tracing::error!(error = ?db_err, "Database error.");
                StatusCode::BAD_REQUEST
            }
            AppError::Service(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        if status != StatusCode::NOT_FOUND {
            tracing::warn!(error = %self, "Request rejected.");
        }

        let body = Json(ResponseDto::<()>::error(self.to_string()));
        (status, body).into_response()
    }
}
