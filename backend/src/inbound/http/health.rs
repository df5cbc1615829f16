//! Service status endpoints.
//!
//! `GET /` and `GET /api/v1/health` answer with the envelope. The
//! orchestration probes `GET /health/live` and `GET /health/ready` answer
//! with bare status codes.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, http::header, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::schemas::{HealthEnvelope, RootEnvelope};
use crate::inbound::http::state::HttpState;

/// Welcome text returned by the root endpoint.
pub const WELCOME_MESSAGE: &str = "欢迎使用 starter API";

/// Status value reported while the service is running.
pub const HEALTHY_STATUS: &str = "healthy";

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RootMessage {
    /// Welcome text.
    #[schema(example = "欢迎使用 starter API")]
    pub message: String,
}

/// Payload of `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    /// Always `healthy` while the process answers.
    #[schema(example = "healthy")]
    pub status: String,
    /// Moment the report was produced.
    pub timestamp: DateTime<Utc>,
}

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Flag the service as draining so both probes fail.
    pub fn mark_unhealthy(&self) {
        self.ready.store(false, Ordering::Release);
        self.live.store(false, Ordering::Release);
    }

    /// Return readiness state.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Return liveness state.
    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };
        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Welcome message.
#[utoipa::path(
    get,
    path = "/",
    tags = ["system"],
    responses((status = 200, description = "Welcome message", body = RootEnvelope))
)]
pub async fn root() -> Envelope<RootMessage> {
    Envelope::ok(RootMessage {
        message: WELCOME_MESSAGE.to_owned(),
    })
}

/// Report that the API is running.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tags = ["system"],
    responses((status = 200, description = "Service is healthy", body = HealthEnvelope))
)]
pub async fn health(state: web::Data<HttpState>) -> Envelope<HealthReport> {
    info!("health check");
    Envelope::ok(HealthReport {
        status: HEALTHY_STATUS.to_owned(),
        timestamp: state.clock.utc(),
    })
}

/// Readiness probe. 200 once the server accepts traffic, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while the process is alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::App;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    fn health_state_transitions() {
        let state = HealthState::new();
        assert!(!state.is_ready());
        assert!(state.is_alive());
        state.mark_ready();
        assert!(state.is_ready());
        state.mark_unhealthy();
        assert!(!state.is_ready());
        assert!(!state.is_alive());
    }

    #[rstest]
    #[case(false, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, StatusCode::OK)]
    #[actix_web::test]
    async fn ready_probe_follows_state(#[case] ready_flag: bool, #[case] expected: StatusCode) {
        let state = web::Data::new(HealthState::new());
        if ready_flag {
            state.mark_ready();
        }
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .route("/health/ready", web::get().to(ready)),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
    }
}
