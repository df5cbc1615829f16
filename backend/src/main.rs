//! Backend entry-point: loads settings, installs logging and serves the API.

use std::io;

use ortho_config::OrthoConfig;
use tracing::error;

use starter::server::Application;
use starter::settings::ServerSettings;
use starter::telemetry;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("failed to load settings: {err}")))?;
    let logging = settings.logging().map_err(io::Error::other)?;
    let telemetry = telemetry::init(&logging).map_err(io::Error::other)?;

    let app = Application::init(&settings, telemetry).map_err(|err| {
        error!(error = %err, "startup failed");
        io::Error::other(err)
    })?;
    app.run().await.map_err(io::Error::other)
}
