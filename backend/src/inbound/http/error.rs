//! HTTP adapter mapping for domain and validation failures.
//!
//! Purpose: keep the domain error type HTTP-agnostic while turning handler
//! failures into consistent responses. Domain errors become the envelope
//! with `data = null`; validation failures keep their raw 422 body.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::validation::ValidationFailure;
use crate::middleware::trace::{TRACE_ID_HEADER, TraceId};

/// Message sent in place of any internal error detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "服务器内部错误";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain failure rendered as an envelope.
    #[error(transparent)]
    Domain(#[from] Error),
    /// Request validation failure rendered as the raw 422 body.
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_ERROR_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(error) => status_for(error.code()),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);
        if let Some(value) = TraceId::current()
            .and_then(|id| HeaderValue::from_str(&id.to_string()).ok())
        {
            builder.insert_header((HeaderName::from_static(TRACE_ID_HEADER), value));
        }
        match self {
            Self::Domain(error) => {
                if status.is_server_error() {
                    error!(message = error.message(), "internal error");
                }
                builder.json(ApiResponse::<()>::failure(status, client_message(error)))
            }
            Self::Validation(failure) => builder.json(failure),
        }
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Self::Domain(Error::internal(INTERNAL_ERROR_MESSAGE))
    }
}

#[cfg(test)]
mod tests;
