use crate::domain::error::DomainError;
use axum::{
    extract::{multipart::MultipartError, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Everything a handler can fail with.
///
/// User mistakes come back as a plain-text message with status 200, a missing
/// session becomes a redirect to the login page, and anything else is a 500.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("template error")]
    Template(#[from] tera::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AppError::Domain(err) => match &err {
                DomainError::Validation { .. }
                | DomainError::AlreadyExists(_)
                | DomainError::InvalidCredentials => (StatusCode::OK, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Unexpected(detail) => {
                    error!(%detail, "unexpected domain error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal error".to_string(),
                    )
                }
            },
            AppError::Form(err) => {
                warn!(error = %err, "form rejected");
                (
                    StatusCode::OK,
                    "missing or malformed form fields".to_string(),
                )
            }
            AppError::Multipart(err) => (err.status(), err.body_text()),
            AppError::Unauthorized => return Redirect::to("/login").into_response(),
            AppError::Template(err) => {
                error!(error = ?err, "template rendering failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
            AppError::Internal(err) => {
                error!(error = ?err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, msg).into_response()
    }
}
