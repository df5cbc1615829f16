//! Last-resort failure handling.
//!
//! [`FaultBarrier`] turns a panicking handler into an error instead of
//! dropping the connection. The error renders as the generic 500 envelope;
//! the panic payload is logged but never sent to the client. Wrap it inside
//! [`super::Trace`] so the response still carries the trace identifier.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain;
use crate::inbound::http::error::ApiError;

/// Middleware converting panics into 500 envelopes.
#[derive(Clone, Copy, Default)]
pub struct FaultBarrier;

impl<S, B> Transform<S, ServiceRequest> for FaultBarrier
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = FaultBarrierMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FaultBarrierMiddleware { service }))
    }
}

/// Service wrapper produced by [`FaultBarrier`].
pub struct FaultBarrierMiddleware<S> {
    service: S,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

// The router needs sole ownership of the request, so only owned copies of
// the method and path outlive the inner call.
fn panic_error(method: &str, path: &str, payload: &(dyn Any + Send)) -> Error {
    error!(
        method,
        path,
        panic = panic_message(payload),
        "handler panicked"
    );
    ApiError::from(domain::Error::internal("handler panicked")).into()
}

impl<S, B> Service<ServiceRequest> for FaultBarrierMiddleware<S>
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
        let method = req.method().to_string();
        let path = req.path().to_owned();
        let fut = match catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = panic_error(&method, &path, payload.as_ref());
                return Box::pin(ready(Err(err)));
            }
        };
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(panic_error(&method, &path, payload.as_ref())),
            }
        })
    }
}
