//! Starter backend: a user management API with a uniform response envelope.
//!
//! Modules follow a hexagonal split: [`domain`] holds the user model and the
//! simulated directory, [`inbound::http`] adapts it to Actix handlers, and
//! [`server`] wires both into a running service configured by [`settings`]
//! and observed through [`telemetry`].

pub mod basics;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod telemetry;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
