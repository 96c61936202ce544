//! TCP listener setup.
//!
//! # Responsibilities
//! - Bind the configured port on all interfaces
//! - Report bind failures with the address that was attempted

use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Address the proxy listens on for `config`.
pub fn listen_addr(config: &ListenerConfig) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port))
}

/// Bind the listen socket.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let addr = listen_addr(config);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    if let Ok(local_addr) = listener.local_addr() {
        tracing::info!(address = %local_addr, "Listener bound");
    }

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_addr_all_interfaces() {
        let addr = listen_addr(&ListenerConfig { port: 5050 });
        assert_eq!(addr.to_string(), "0.0.0.0:5050");
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind(&ListenerConfig { port: 0 }).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_port_in_use_fails() {
        let taken = bind(&ListenerConfig { port: 0 }).await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let err = bind(&ListenerConfig { port }).await.unwrap_err();
        assert!(err.to_string().contains(&port.to_string()));
    }
}
