//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

use rest_proxy::config::loader::{parse_block_rules, parse_delay_rules};
use rest_proxy::{HttpServer, ProxyConfig, Shutdown};

/// A running mock backend and the number of requests it has served.
pub struct MockBackend {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Start a backend that echoes what it received as JSON.
///
/// `/status/{code}` answers with that status. Every response carries two
/// `x-backend` header values, `one` then `two`.
pub async fn start_echo_backend() -> MockBackend {
    let calls = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/{*path}", any(echo))
        .route("/", any(echo))
        .with_state(calls.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { addr, calls }
}

async fn echo(State(calls): State<Arc<AtomicUsize>>, request: Request<Body>) -> Response {
    calls.fetch_add(1, Ordering::SeqCst);

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let headers: Vec<(String, String)> = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();

    let status = parts
        .uri
        .path()
        .strip_prefix("/status/")
        .and_then(|code| code.parse::<u16>().ok())
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::OK);

    let mut response = (
        status,
        Json(json!({
            "method": parts.method.as_str(),
            "uri": parts.uri.to_string(),
            "headers": headers,
            "body": String::from_utf8_lossy(&bytes),
        })),
    )
        .into_response();
    response
        .headers_mut()
        .append("x-backend", "one".parse().unwrap());
    response
        .headers_mut()
        .append("x-backend", "two".parse().unwrap());
    response
}

/// An address nothing is listening on.
pub fn unused_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Start the proxy in front of `backend` with the given JSON rule tables.
pub async fn start_proxy(backend: SocketAddr, delay: &str, block: &str) -> (SocketAddr, Shutdown) {
    let config = ProxyConfig {
        backend: backend.to_string().parse().unwrap(),
        delay_rules: parse_delay_rules(delay).unwrap(),
        block_rules: parse_block_rules(block).unwrap(),
        ..ProxyConfig::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = HttpServer::new(config).run(listener, signal).await;
    });

    (addr, shutdown)
}

/// HTTP client that ignores proxy environment variables.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

/// Values of one header in the echoed request, in arrival order.
#[allow(dead_code)]
pub fn echoed_header(echo: &serde_json::Value, name: &str) -> Vec<String> {
    echo["headers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|pair| pair[0] == name)
        .map(|pair| pair[1].as_str().unwrap().to_string())
        .collect()
}
