//! In-process application harness shared by the integration suites.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::Value;
use starter::server::{AppDependencies, build_app};
use starter::settings::DEFAULT_MAX_PAGE_LIMIT;

/// Clock frozen at [`fixed_now`].
pub struct FrozenClock;

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        fixed_now().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Instant reported by [`FrozenClock`].
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Captured response.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send `request` through a freshly built application.
pub async fn send(request: test::TestRequest) -> Reply {
    let deps = AppDependencies::simulated(Arc::new(FrozenClock), DEFAULT_MAX_PAGE_LIMIT);
    let app = test::init_service(build_app(deps)).await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    Reply {
        status,
        trace_id,
        body,
    }
}
