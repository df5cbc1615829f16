//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. Wrap order, outermost
//! first: [`Trace`], [`RequestLog`], [`FaultBarrier`].

pub mod fault;
pub mod request_log;
pub mod trace;

pub use fault::FaultBarrier;
pub use request_log::RequestLog;
pub use trace::Trace;
