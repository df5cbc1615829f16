//! Uniform response envelope.
//!
//! Every enveloped response has the shape `{code, data, message}`. Success
//! uses `code = 0`; failures repeat the HTTP status in `code` and carry
//! `data = null`.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Envelope code signalling success.
pub const SUCCESS_CODE: u16 = 0;

/// Message attached to successful responses unless a handler overrides it.
pub const SUCCESS_MESSAGE: &str = "成功";

/// Wire representation of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// `0` on success, the HTTP status code otherwise.
    pub code: u16,
    /// Payload; `null` for acknowledgements and failures.
    pub data: Option<T>,
    /// Human-readable outcome.
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data` and the default message.
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            data: Some(data),
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }

    /// Failure envelope for `status`.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            data: None,
            message: message.into(),
        }
    }

    /// Whether the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Successful handler output paired with its HTTP status.
///
/// # Examples
/// ```
/// use starter::inbound::http::envelope::Envelope;
///
/// let reply = Envelope::created(7).with_message("done");
/// assert_eq!(reply.body().data, Some(7));
/// assert_eq!(reply.body().message, "done");
/// ```
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    status: StatusCode,
    body: ApiResponse<T>,
}

impl<T> Envelope<T> {
    /// `200 OK` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse::success(data),
        }
    }

    /// `201 Created` carrying `data`.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            body: ApiResponse::success(data),
        }
    }

    /// Replace the default success message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = message.into();
        self
    }

    /// HTTP status the envelope is sent with.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Envelope body.
    pub fn body(&self) -> &ApiResponse<T> {
        &self.body
    }
}

impl Envelope<()> {
    /// `200 OK` with `data = null`, used when an operation has no payload.
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: ApiResponse {
                code: SUCCESS_CODE,
                data: None,
                message: message.into(),
            },
        }
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}
