//! Server construction and lifecycle.
//!
//! [`build_app`] wires middleware, documentation and the route table into an
//! Actix [`App`]. [`Application`] owns the bound server together with the
//! process-level collaborators and exposes the explicit
//! `init` / `run` / `shutdown` lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::domain::SimulatedUserDirectory;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::routes::{configure, not_found};
use crate::inbound::http::state::HttpState;
use crate::middleware::{FaultBarrier, RequestLog, Trace};
use crate::settings::ServerSettings;
use crate::telemetry::{RequestLogger, Telemetry};

/// Path serving the Swagger UI.
pub const DOCS_PATH: &str = "/api/v1/docs";
/// Path serving the OpenAPI document.
pub const OPENAPI_PATH: &str = "/api/v1/openapi.json";

/// Failures raised while starting or running the server.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The listener could not bind.
    #[error("failed to bind {host}:{port}: {source}")]
    Bind {
        /// Requested host.
        host: String,
        /// Requested port.
        port: u16,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The server stopped with an I/O error.
    #[error("server terminated abnormally: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Handler state.
    pub http_state: web::Data<HttpState>,
    /// Probe flags.
    pub health_state: web::Data<HealthState>,
    /// Access log sink.
    pub request_logger: RequestLogger,
}

impl AppDependencies {
    /// Dependencies backed by the simulated user directory.
    pub fn simulated(clock: Arc<dyn Clock>, max_page_limit: u32) -> Self {
        let users = Arc::new(SimulatedUserDirectory::new(Arc::clone(&clock)));
        Self {
            http_state: web::Data::new(
                HttpState::new(users, clock).with_max_page_limit(max_page_limit),
            ),
            health_state: web::Data::new(HealthState::new()),
            request_logger: RequestLogger::default(),
        }
    }
}

/// Build the application served by each worker.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        health_state,
        request_logger,
    } = deps;

    App::new()
        .app_data(http_state)
        .app_data(health_state)
        .wrap(FaultBarrier)
        .wrap(RequestLog::new(request_logger))
        .wrap(Trace)
        .service(
            SwaggerUi::new(format!("{DOCS_PATH}/{{_:.*}}")).url(OPENAPI_PATH, ApiDoc::openapi()),
        )
        .configure(configure)
        .default_service(web::to(not_found))
}

/// Bound server plus the collaborators it needs until shutdown.
pub struct Application {
    server: Server,
    addrs: Vec<SocketAddr>,
    health_state: web::Data<HealthState>,
    telemetry: Telemetry,
}

impl Application {
    /// Bind the listener described by `settings` and prepare the workers.
    ///
    /// The server does not accept connections until [`Application::run`] is
    /// awaited.
    ///
    /// # Errors
    /// Returns [`StartupError::Bind`] when the address cannot be bound.
    pub fn init(settings: &ServerSettings, telemetry: Telemetry) -> Result<Self, StartupError> {
        let deps = AppDependencies {
            request_logger: telemetry.request_logger(),
            ..AppDependencies::simulated(Arc::new(DefaultClock), settings.max_page_limit())
        };
        let health_state = deps.health_state.clone();
        let (host, port) = settings.bind_address();

        let http_server = HttpServer::new(move || build_app(deps.clone()))
            .bind((host.as_str(), port))
            .map_err(|source| StartupError::Bind {
                host: host.clone(),
                port,
                source,
            })?;
        let addrs = http_server.addrs();
        let server = http_server.run();

        health_state.mark_ready();
        info!(?addrs, "server initialised");
        Ok(Self {
            server,
            addrs,
            health_state,
            telemetry,
        })
    }

    /// Addresses the listener is bound to.
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    /// Handle that stops the server from another task.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: self.server.handle(),
            health_state: self.health_state.clone(),
        }
    }

    /// Serve until the server is stopped by a signal or a [`ShutdownHandle`],
    /// then release the process collaborators.
    ///
    /// # Errors
    /// Returns [`StartupError::Serve`] when the server fails.
    pub async fn run(self) -> Result<(), StartupError> {
        let Self {
            server,
            health_state,
            telemetry,
            ..
        } = self;
        info!("server running");
        let outcome = server.await;
        Self::release(&health_state, telemetry);
        outcome.map_err(StartupError::Serve)
    }

    /// Stop the server gracefully and release its collaborators.
    pub async fn shutdown(self) {
        let Self {
            server,
            health_state,
            telemetry,
            ..
        } = self;
        health_state.mark_unhealthy();
        let handle = server.handle();
        let (outcome, ()) = tokio::join!(server, handle.stop(true));
        if let Err(error) = outcome {
            warn!(%error, "server stopped with an error");
        }
        Self::release(&health_state, telemetry);
    }

    fn release(health_state: &HealthState, telemetry: Telemetry) {
        health_state.mark_unhealthy();
        info!("server stopped");
        telemetry.shutdown();
    }
}

/// Cloneable trigger for graceful shutdown.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: ServerHandle,
    health_state: web::Data<HealthState>,
}

impl ShutdownHandle {
    /// Fail the probes, then stop accepting connections and drain workers.
    pub async fn shutdown(&self) {
        self.health_state.mark_unhealthy();
        self.server.stop(true).await;
    }
}
