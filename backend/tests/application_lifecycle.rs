//! Lifecycle of the bound server: init, serve, shutdown.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};

use rstest::rstest;
use starter::server::Application;
use starter::settings::ServerSettings;
use starter::telemetry::Telemetry;

fn loopback_settings() -> ServerSettings {
    ServerSettings {
        host: Some("127.0.0.1".to_owned()),
        port: Some(0),
        log_level: None,
        log_format: None,
        log_to_file: false,
        log_dir: None,
        log_file: None,
        max_page_limit: None,
    }
}

fn get_status_line(addr: SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).expect("connect");
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"
    )
    .expect("write request");
    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read response");
    response.lines().next().unwrap_or_default().to_owned()
}

#[rstest]
#[actix_web::test]
async fn application_serves_until_shut_down() {
    let app = Application::init(&loopback_settings(), Telemetry::disabled()).expect("binds");
    let addr = *app.addrs().first().expect("bound address");
    let handle = app.handle();
    let server = actix_web::rt::spawn(app.run());

    let status = actix_web::rt::task::spawn_blocking(move || get_status_line(addr, "/health/ready"))
        .await
        .expect("request thread");
    assert!(status.starts_with("HTTP/1.1 200"), "unexpected status line: {status}");

    handle.shutdown().await;
    server
        .await
        .expect("server task")
        .expect("server stops cleanly");
}

#[rstest]
#[actix_web::test]
async fn shutdown_stops_an_idle_application() {
    let app = Application::init(&loopback_settings(), Telemetry::disabled()).expect("binds");
    assert!(!app.addrs().is_empty());
    app.shutdown().await;
}

#[rstest]
fn init_reports_ports_in_use() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve a port");
    let port = taken.local_addr().expect("reserved address").port();
    let settings = ServerSettings {
        port: Some(port),
        ..loopback_settings()
    };
    let system = actix_web::rt::System::new();
    let err = system
        .block_on(async { Application::init(&settings, Telemetry::disabled()).map(|_| ()) })
        .expect_err("port is taken");
    assert!(err.to_string().contains(&port.to_string()));
}
