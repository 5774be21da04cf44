use actix_web::{
    App, HttpResponse, HttpServer,
    http::header::{ContentType, LOCATION},
    rt::time::sleep,
    web,
};
use std::net::TcpListener;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing_actix_web::TracingLogger;

use root_status_check::{
    check::ApplicationAddress,
    harness::Harness,
    telemetry::{get_subscriber, init_subscriber},
};

// ensure the `tracing` subscriber is only initialized once using `LazyLock`
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

// how the fixture application answers `GET /`
#[derive(Clone, Copy)]
pub enum Fixture {
    Healthy,
    Missing,
    Hanging,
    Redirecting,
}

pub struct TestApp {
    pub address: ApplicationAddress,
    pub port: u16,
    pub harness: Harness,
    pub api_client: reqwest::Client,
}

async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body("<!doctype html><title>home</title>")
}

async fn moved() -> HttpResponse {
    HttpResponse::MovedPermanently()
        .insert_header((LOCATION, "/home"))
        .finish()
}

async fn hang() -> HttpResponse {
    sleep(Duration::from_secs(60)).await;
    HttpResponse::Ok().finish()
}

pub async fn spawn_app(fixture: Fixture) -> TestApp {
    LazyLock::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port.");
    let local_addr = listener.local_addr().unwrap();

    let server = HttpServer::new(move || {
        let app = App::new().wrap(TracingLogger::default());
        match fixture {
            Fixture::Healthy => app.route("/", web::get().to(root)),
            // no handler at `/`, actix answers 404
            Fixture::Missing => app.route("/home", web::get().to(root)),
            Fixture::Hanging => app.route("/", web::get().to(hang)),
            // following the redirect would land on a 200
            Fixture::Redirecting => app
                .route("/", web::get().to(moved))
                .route("/home", web::get().to(root)),
        }
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen on the fixture port.")
    .run();

    // launch as background task
    let _ = tokio::spawn(server);

    let address = ApplicationAddress::from_socket_addr(local_addr).unwrap();
    TestApp {
        harness: Harness::new(address.clone()).expect("Failed to build harness."),
        address,
        port: local_addr.port(),
        api_client: reqwest::Client::new(),
    }
}

// an address nothing is listening on
pub fn unreachable_address() -> ApplicationAddress {
    LazyLock::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port.");
    let local_addr = listener.local_addr().unwrap();
    drop(listener);

    ApplicationAddress::from_socket_addr(local_addr).unwrap()
}

// raw tcp server: sends a 200 head promising 100 bytes, writes 3, then goes quiet
pub async fn spawn_stalled_body() -> ApplicationAddress {
    LazyLock::force(&TRACING);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port.");
    let local_addr = listener.local_addr().unwrap();

    let _ = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("Failed to accept.");
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 100\r\n\r\nabc")
            .await
            .expect("Failed to write response head.");
        // hold the socket open without finishing the body
        tokio::time::sleep(Duration::from_secs(60)).await;
        drop(socket);
    });

    ApplicationAddress::from_socket_addr(local_addr).unwrap()
}
