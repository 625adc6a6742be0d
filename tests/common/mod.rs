//! Backends for integration tests, each listening on an ephemeral port.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use shop_console::{build_server, new_catalog};

fn ephemeral_listener() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let port = listener.local_addr().expect("addr failed").port();
    (listener, port)
}

/// Start the reference backend with an empty catalog and return its base URL.
pub fn spawn_backend() -> String {
    let (listener, port) = ephemeral_listener();
    let server = build_server(new_catalog(), listener).expect("Failed to start reference server");
    tokio::spawn(server);
    format!("http://127.0.0.1:{}/api", port)
}

/// Start a backend that answers every request with `status` and `body`.
pub fn spawn_stub(status: u16, body: &'static str) -> String {
    let (listener, port) = ephemeral_listener();
    let server = HttpServer::new(move || {
        App::new().default_service(web::to(move || async move {
            let status = StatusCode::from_u16(status).expect("valid status");
            HttpResponse::build(status)
                .content_type("application/json")
                .body(body)
        }))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    tokio::spawn(server);
    format!("http://127.0.0.1:{}/api", port)
}

/// One request as the server saw it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

/// Start a backend that records every request and answers `status` with
/// `reply`. Returns the base URL and the shared request log.
pub fn spawn_recorder(status: u16, reply: &'static str) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let (listener, port) = ephemeral_listener();
    let seen: Arc<Mutex<Vec<Recorded>>> = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let server = HttpServer::new(move || {
        let log = log.clone();
        App::new().default_service(web::to(move |req: HttpRequest, body: web::Bytes| {
            let log = log.clone();
            async move {
                log.lock().expect("request log poisoned").push(Recorded {
                    method: req.method().to_string(),
                    path: req.path().to_string(),
                    content_type: req
                        .headers()
                        .get(CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
                let status = StatusCode::from_u16(status).expect("valid status");
                HttpResponse::build(status)
                    .content_type("application/json")
                    .body(reply)
            }
        }))
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    tokio::spawn(server);
    (format!("http://127.0.0.1:{}/api", port), seen)
}

/// A base URL nothing is listening on.
pub fn dead_base_url() -> String {
    let (listener, port) = ephemeral_listener();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}
