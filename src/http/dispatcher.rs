//! Per-request pipeline.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → log (method, path, header snapshot)
//!     → delay stage (sleep if a delay rule matches)
//!     → block stage (answer with rule status, echo request body)
//!     → forward stage (forwarder.rs)
//! ```
//!
//! # Design Decisions
//! - No state survives a request; rule tables are read-only
//! - The delay is an async sleep: it parks this request only
//! - A blocked request never reaches the backend

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};

use crate::config::ProxyConfig;
use crate::http::forwarder::Forwarder;
use crate::http::headers::headers_json;
use crate::routing::{decoded_path, BlockRules, DelayRules};

/// What the rule tables say about one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    /// Sleep this long before the block/forward stage.
    pub delay: Option<Duration>,
    /// Short-circuit with this status instead of forwarding.
    pub block: Option<StatusCode>,
}

/// Applies delay and block rules, then forwards.
///
/// Cheap to clone: tables are shared and the HTTP client is pooled.
#[derive(Clone)]
pub struct Dispatcher {
    delay_rules: Arc<DelayRules>,
    block_rules: Arc<BlockRules>,
    forwarder: Forwarder,
}

impl Dispatcher {
    pub fn new(delay_rules: DelayRules, block_rules: BlockRules, forwarder: Forwarder) -> Self {
        Self {
            delay_rules: Arc::new(delay_rules),
            block_rules: Arc::new(block_rules),
            forwarder,
        }
    }

    /// Build a dispatcher from the startup configuration.
    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(
            config.delay_rules.clone(),
            config.block_rules.clone(),
            Forwarder::new(config.backend.clone()),
        )
    }

    /// Evaluate both rule tables for `path`.
    pub fn decide(&self, path: &str) -> Decision {
        Decision {
            delay: self.delay_rules.delay_for(path),
            block: self.block_rules.status_for(path),
        }
    }

    /// Run the full pipeline for one request.
    ///
    /// Rules see the percent-decoded path; the backend gets the raw URI.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let path = decoded_path(request.uri().path());

        tracing::info!(
            method = %request.method(),
            path = %path,
            headers = %headers_json(request.headers()),
            "Incoming request"
        );

        let decision = self.decide(&path);

        if let Some(delay) = decision.delay {
            tracing::info!(path = %path, delay_secs = delay.as_secs(), "Delaying request");
            tokio::time::sleep(delay).await;
        }

        if let Some(status) = decision.block {
            tracing::info!(path = %path, status = status.as_u16(), "Blocking request");
            return reflect_body(status, request.into_body());
        }

        self.forwarder.forward(request).await
    }
}

/// Answer with `status`, streaming the request body back unchanged.
fn reflect_body(status: StatusCode, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher(delay: &str, block: &str) -> Dispatcher {
        let config = ProxyConfig {
            delay_rules: crate::config::loader::parse_delay_rules(delay).unwrap(),
            block_rules: crate::config::loader::parse_block_rules(block).unwrap(),
            ..ProxyConfig::default()
        };
        Dispatcher::from_config(&config)
    }

    #[test]
    fn test_decide_no_rules() {
        let d = dispatcher("{}", "{}");
        assert_eq!(d.decide("/user/profile"), Decision::default());
    }

    #[test]
    fn test_decide_delay_and_block_are_independent() {
        let d = dispatcher(r#"{"profile": 2}"#, r#"{"admin": 403}"#);

        assert_eq!(
            d.decide("/user/profile"),
            Decision {
                delay: Some(Duration::from_secs(2)),
                block: None,
            }
        );
        assert_eq!(
            d.decide("/admin/login"),
            Decision {
                delay: None,
                block: Some(StatusCode::FORBIDDEN),
            }
        );
        assert_eq!(
            d.decide("/admin/profile"),
            Decision {
                delay: Some(Duration::from_secs(2)),
                block: Some(StatusCode::FORBIDDEN),
            }
        );
    }

    #[tokio::test]
    async fn test_block_echoes_request_body() {
        let d = dispatcher("{}", r#"{"admin": 403}"#);
        let request = Request::builder()
            .method("POST")
            .uri("/admin/login")
            .body(Body::from("x=1"))
            .unwrap();

        let response = d.handle(request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"x=1");
    }

    #[tokio::test]
    async fn test_block_matches_decoded_path() {
        let d = dispatcher("{}", r#"{"admin panel": 403}"#);
        let request = Request::builder()
            .uri("/admin%20panel/users")
            .body(Body::empty())
            .unwrap();

        let response = d.handle(request).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_zero_delay_then_block() {
        let d = dispatcher(r#"{"admin": 0}"#, r#"{"admin": 418}"#);
        let request = Request::builder()
            .uri("/admin")
            .body(Body::empty())
            .unwrap();

        let response = d.handle(request).await;
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_precedes_block() {
        let d = dispatcher(r#"{"slow": 3}"#, r#"{"slow": 404}"#);
        let request = Request::builder()
            .uri("/very/slow")
            .body(Body::empty())
            .unwrap();

        let start = tokio::time::Instant::now();
        let response = d.handle(request).await;
        assert!(start.elapsed() >= Duration::from_secs(3));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
