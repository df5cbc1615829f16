//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::App;
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::server::{AppDependencies, build_app};

/// Clock frozen at [`fixture_timestamp`].
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

/// Timestamp reported by [`FixtureClock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Full application backed by the simulated directory and a frozen clock.
pub fn test_app(
    max_page_limit: u32,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    build_app(AppDependencies::simulated(
        Arc::new(FixtureClock),
        max_page_limit,
    ))
}
