//! Access logging middleware.
//!
//! Emits one record per request through the [`RequestLogger`] handed out by
//! [`crate::telemetry::Telemetry`]. Wrap it inside [`super::Trace`] so the
//! record carries the request's trace identifier.

use std::rc::Rc;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};

use crate::telemetry::{RequestLogger, RequestOutcome};

/// Middleware logging method, path, status and latency.
#[derive(Clone, Default)]
pub struct RequestLog {
    logger: RequestLogger,
}

impl RequestLog {
    /// Log through `logger`.
    pub fn new(logger: RequestLogger) -> Self {
        Self { logger }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware {
            service,
            logger: Rc::new(self.logger.clone()),
        }))
    }
}

/// Service wrapper produced by [`RequestLog`].
pub struct RequestLogMiddleware<S> {
    service: S,
    logger: Rc<RequestLogger>,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let logger = Rc::clone(&self.logger);
        let fut = self.service.call(req);
        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            logger.record(&RequestOutcome {
                method: &method,
                path: &path,
                status: status.as_u16(),
                elapsed: started.elapsed(),
            });
            result
        })
    }
}
