//! OpenAPI schema definitions for the response envelope.
//!
//! [`crate::inbound::http::envelope::ApiResponse`] is generic, so each
//! concrete payload gets a named wrapper here that mirrors the wire shape
//! `{code, data, message}`. The wrappers exist for documentation only.

use utoipa::ToSchema;

use crate::inbound::http::health::{HealthReport, RootMessage};
use crate::inbound::http::users::{UserPage, UserResponse};

/// Envelope carrying a single user.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserEnvelope {
    /// `0` on success.
    #[schema(example = 0)]
    code: u16,
    /// The user.
    data: UserResponse,
    /// Outcome message.
    #[schema(example = "成功")]
    message: String,
}

/// Envelope carrying a page of users.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserPageEnvelope {
    /// `0` on success.
    #[schema(example = 0)]
    code: u16,
    /// The page.
    data: UserPage,
    /// Outcome message.
    #[schema(example = "成功")]
    message: String,
}

/// Envelope acknowledging an operation without payload.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct AcknowledgementEnvelope {
    /// `0` on success.
    #[schema(example = 0)]
    code: u16,
    /// Always `null`.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
    /// Outcome message.
    #[schema(example = "用户删除成功")]
    message: String,
}

/// Envelope describing a failure.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorEnvelope {
    /// HTTP status code of the response.
    #[schema(example = 404)]
    code: u16,
    /// Always `null`.
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
    /// Human-readable cause.
    #[schema(example = "用户不存在 (user not found)")]
    message: String,
}

/// Envelope returned by `GET /api/v1/health`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct HealthEnvelope {
    /// `0` on success.
    #[schema(example = 0)]
    code: u16,
    /// Health report.
    data: HealthReport,
    /// Outcome message.
    #[schema(example = "成功")]
    message: String,
}

/// Envelope returned by `GET /`.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct RootEnvelope {
    /// `0` on success.
    #[schema(example = 0)]
    code: u16,
    /// Welcome payload.
    data: RootMessage,
    /// Outcome message.
    #[schema(example = "成功")]
    message: String,
}
