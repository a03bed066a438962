use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                HttpError::BadRequest(format!("Validation failed: {}", errors.join("; ")))
            }

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Product not found".into()),
                RepositoryError::NothingDeleted(id) => {
                    HttpError::NotFound(format!("No product with id {id}"))
                }
                RepositoryError::ForeignKey(msg) | RepositoryError::AlreadyExists(msg) => {
                    HttpError::Internal(msg)
                }
                err if err.is_transactional() => HttpError::Internal(err.to_string()),
                _ => HttpError::Internal("Database error".into()),
            },

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(msg))).into_response()
    }
}
