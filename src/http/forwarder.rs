//! Forwarding to the backend and relaying its response.
//!
//! # Responsibilities
//! - Rewrite the inbound URI onto the fixed backend authority
//! - Copy method, headers and body stream onto the outbound request
//! - Relay backend status, headers and body back to the caller
//! - Map transport failures to 503 Service Unavailable
//!
//! # Design Decisions
//! - Bodies are streamed in both directions, never buffered
//! - Multi-valued headers are appended, never collapsed
//! - `Host` is left to the client so the backend sees its own authority
//! - No retries, no timeouts, no redirect following

use std::error::Error as StdError;

use axum::{
    body::Body,
    http::{
        header,
        uri::{PathAndQuery, Scheme},
        HeaderValue, Request, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::config::BackendAuthority;
use crate::http::headers::headers_json;

/// Errors raised while contacting the backend.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The outbound request could not be built.
    #[error("invalid upstream request: {0}")]
    Build(#[from] axum::http::Error),

    /// Connection, DNS or protocol failure talking to the backend.
    #[error("{0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),
}

/// Forwards requests to the single configured backend.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    backend: BackendAuthority,
}

impl Forwarder {
    /// Create a forwarder with its own pooled HTTP client.
    pub fn new(backend: BackendAuthority) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client, backend }
    }

    /// Target URI on the backend: same path and query, backend authority.
    pub fn upstream_uri(&self, uri: &Uri) -> Result<Uri, ForwardError> {
        let path_and_query = uri
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.backend.as_authority().clone())
            .path_and_query(path_and_query)
            .build()?)
    }

    /// Build the outbound request. Ownership of the body moves with it.
    pub fn upstream_request(&self, request: Request<Body>) -> Result<Request<Body>, ForwardError> {
        let (parts, body) = request.into_parts();
        let uri = self.upstream_uri(&parts.uri)?;

        let mut builder = Request::builder().method(parts.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in parts.headers.iter() {
                if name == header::HOST {
                    continue;
                }
                headers.append(name.clone(), value.clone());
            }
        }

        Ok(builder.body(body)?)
    }

    /// Send `request` to the backend and relay the outcome to the caller.
    pub async fn forward(&self, request: Request<Body>) -> Response {
        match self.send(request).await {
            Ok(response) => response,
            Err(e) => {
                let message = error_chain(&e);
                tracing::error!(
                    backend = %self.backend,
                    error = %message,
                    "Backend request failed"
                );
                unavailable(&message)
            }
        }
    }

    async fn send(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let upstream = self.upstream_request(request)?;
        let response: hyper::Response<Incoming> = self.client.request(upstream).await?;

        let (parts, body) = response.into_parts();
        tracing::info!(
            status = %parts.status,
            headers = %headers_json(&parts.headers),
            "Response status"
        );

        // Dropping the body (finished or aborted) releases the backend connection.
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Join an error with all of its sources, outermost first.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Plain-text 503 carrying the failure description.
fn unavailable(message: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8")),
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        ],
        format!("{}\n", message),
    )
        .into_response()
}
