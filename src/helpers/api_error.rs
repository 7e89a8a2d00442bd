use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

/// Failures a handler reports back to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid password")]
    InvalidCredentials,

    #[error("failed to hash password: {0}")]
    PasswordHash(String),

    #[error("failed to issue session cookie: {0}")]
    SessionCookie(String),

    #[error("too many files, at most {0} photos per upload")]
    TooManyFiles(usize),

    #[error("Unexpected field: {0}")]
    UnexpectedField(String),

    #[error("malformed multipart request: {0}")]
    Multipart(String),

    #[error("failed to download image: {0}")]
    Download(String),

    #[error("failed to store upload: {0}")]
    Upload(#[from] std::io::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::TooManyFiles(_)
            | ApiError::UnexpectedField(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::Download(_) => StatusCode::BAD_GATEWAY,
            ApiError::PasswordHash(_)
            | ApiError::SessionCookie(_)
            | ApiError::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Request failed due to: {}", self);
        }
        (status, Json(self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_is_unprocessable() {
        let err = ApiError::InvalidCredentials;
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "Invalid password");
    }

    #[test]
    fn io_failures_are_server_errors() {
        let err: ApiError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("disk full"));
    }
}
