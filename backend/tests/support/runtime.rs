//! Blocking bridge from synchronous BDD steps into the actix test harness.
//!
//! Actix services are `!Send`, so each call drives the request on a
//! single-threaded Tokio runtime inside a `LocalSet`.

use actix_web::test::TestRequest;
use tokio::runtime::Builder;
use tokio::task::LocalSet;

use crate::app::{Reply, send};

/// Send `request` through the full application and wait for the reply.
pub fn dispatch(request: TestRequest) -> Reply {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("create runtime");
    LocalSet::new().block_on(&runtime, send(request))
}
