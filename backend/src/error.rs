//! Service-wide error type.
//!
//! Handlers return `Result<_, ServiceError>` and let actix translate the error
//! through [`ResponseError`]: the variant picks the status code and the
//! carried [`Message`] becomes a localized JSON body.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::{error, warn};

use crate::i18n::keys::ERROR_DATABASE;
use crate::i18n::Message;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(Message),

    #[error("authentication failed: {0}")]
    Authentication(Message),

    #[error("permission denied: {0}")]
    Permission(Message),

    #[error("not found: {0}")]
    NotFound(Message),

    #[error("report generation failed: {0}")]
    Reporting(Message),

    #[error("reference data request failed: {0}")]
    Remote(Message),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl ServiceError {
    pub fn message(&self) -> Message {
        match self {
            ServiceError::Validation(m)
            | ServiceError::Authentication(m)
            | ServiceError::Permission(m)
            | ServiceError::NotFound(m)
            | ServiceError::Reporting(m)
            | ServiceError::Remote(m) => m.clone(),
            ServiceError::Database(e) => Message::with_args(ERROR_DATABASE, [e]),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Permission(_) => StatusCode::FORBIDDEN,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Reporting(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        HttpResponse::build(status).json(self.message().localized())
    }
}
